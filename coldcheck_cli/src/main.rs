//! # ColdCheck CLI Application
//!
//! Command-line interface for the thermal balance calculator. Flags cover
//! every input; `--interactive` walks through them with prompts instead.
//! Saved setups and the brand catalog live in JSON files in the working
//! directory unless overridden.
//!
//! ## Examples
//!
//! ```text
//! coldcheck --bag 4.0 --pad 3.5 --tout 20 --condition snow
//! coldcheck --load overnight --brand thermarest_neoair_xtherm --explain
//! coldcheck --list-brands
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use coldcheck_core::biometrics::{AgeGroup, HeightClass, Sex};
use coldcheck_core::brands::{BrandCatalog, GearKind, BRANDS_FILE};
use coldcheck_core::errors::BalanceError;
use coldcheck_core::insulation::LayerSlot;
use coldcheck_core::setups::{SavedSetup, SetupStore, SETUPS_FILE};
use coldcheck_core::trip::{
    calculate, TripInput, TripResult, DEFAULT_AMBIENT_TEMP_F, DEFAULT_BODY_TEMP_F,
    DEFAULT_DURATION_HR,
};
use coldcheck_core::weather::{WeatherCondition, DEFAULT_WIND_MPH};

/// Thermal balance calculator for cold-weather trips
#[derive(Parser, Debug)]
#[command(name = "coldcheck")]
#[command(about = "Will your gear keep you warm? Heat generated vs heat lost.", long_about = None)]
struct Args {
    /// Jacket R-value
    #[arg(long, default_value_t = 0.0)]
    jacket: f64,

    /// Sleeping bag R-value
    #[arg(long, default_value_t = 0.0)]
    bag: f64,

    /// Sleeping pad R-value
    #[arg(long, default_value_t = 0.0)]
    pad: f64,

    /// Base/mid layers R-value
    #[arg(long, default_value_t = 0.0)]
    layers: f64,

    /// Extremities (hat, gloves, socks) R-value
    #[arg(long, default_value_t = 0.0)]
    extremities: f64,

    /// Shelter R-value
    #[arg(long, default_value_t = 0.0)]
    shelter: f64,

    /// Weather condition (calm, light, windy, gale, rain, snow, wet_cold)
    #[arg(short, long, default_value = "calm")]
    condition: String,

    /// Sustained wind speed in mph
    #[arg(short, long, default_value_t = DEFAULT_WIND_MPH)]
    wind: f64,

    /// Ambient temperature in °F
    #[arg(long, default_value_t = DEFAULT_AMBIENT_TEMP_F)]
    tout: f64,

    /// Body core temperature in °F
    #[arg(long, default_value_t = DEFAULT_BODY_TEMP_F)]
    tbody: f64,

    /// Trip duration in hours
    #[arg(short, long, default_value_t = DEFAULT_DURATION_HR)]
    duration: f64,

    /// Age profile (kid, adult, senior)
    #[arg(short, long, default_value = "adult")]
    profile: String,

    /// Height class (short, regular, tall)
    #[arg(long, default_value = "regular")]
    height: String,

    /// Sex (male, female)
    #[arg(long, default_value = "male")]
    sex: String,

    /// Body weight in lb (omit to skip metabolic scaling)
    #[arg(long)]
    weight: Option<f64>,

    /// Apply a cataloged pad's R-value to the pad slot
    #[arg(short, long)]
    brand: Option<String>,

    /// List the brand catalog and exit
    #[arg(long)]
    list_brands: bool,

    /// Load a saved setup before calculating
    #[arg(short, long)]
    load: Option<String>,

    /// Save the assembled inputs under this name
    #[arg(short, long)]
    save: Option<String>,

    /// List saved setups and exit
    #[arg(long)]
    list: bool,

    /// Setup store location
    #[arg(long, value_name = "PATH", default_value = SETUPS_FILE)]
    setups_file: PathBuf,

    /// Brand catalog location
    #[arg(long, value_name = "PATH", default_value = BRANDS_FILE)]
    brands_file: PathBuf,

    /// Prompt for inputs instead of taking them from flags
    #[arg(short, long)]
    interactive: bool,

    /// Show the wind/weather derating breakdown
    #[arg(short, long)]
    explain: bool,

    /// Print the result as JSON
    #[arg(short, long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    if args.list {
        list_setups(&args.setups_file);
        return;
    }
    if args.list_brands {
        list_brands(&args.brands_file);
        return;
    }

    let mut input = build_input(&args);

    if let Some(name) = &args.load {
        let store = SetupStore::load(&args.setups_file);
        match store.get(name) {
            Some(setup) => {
                setup.apply_to(&mut input);
                println!("Loaded setup: {}", name);
            }
            None => {
                println!("No such setup: {}", name);
                return;
            }
        }
    }

    if let Some(key) = &args.brand {
        let catalog = BrandCatalog::load(&args.brands_file);
        match catalog.get(key) {
            Some(info) if info.kind == GearKind::Pad => {
                input.insulation.set_r(LayerSlot::Pad, info.r_value);
                println!("Applied brand pad R = {}", info.r_value);
            }
            Some(_) => {} // known entry, but only pads feed a slot
            None => println!("Unknown brand key: {}", key),
        }
    }

    if args.interactive {
        println!("ColdCheck CLI - Thermal Balance Calculator");
        println!("==========================================");
        println!();
        prompt_for_input(&mut input);
        println!();
    }

    match calculate(&input) {
        Ok(result) => {
            print_result(&input, &result, args.explain);

            if args.json {
                if let Ok(json) = serde_json::to_string_pretty(&result) {
                    println!();
                    println!("JSON Output (for scripts/API use):");
                    println!("{}", json);
                }
            }

            // Save last, so only inputs that calculated cleanly are kept
            if let Some(name) = &args.save {
                let mut store = SetupStore::load(&args.setups_file);
                store.insert(name.clone(), SavedSetup::from_input(&input));
                match store.save(&args.setups_file) {
                    Ok(()) => println!("Saved setup as: {}", name),
                    Err(e) => exit_with_error(&e),
                }
            }
        }
        Err(e) => exit_with_error(&e),
    }
}

/// Assemble a trip input from the command-line flags
fn build_input(args: &Args) -> TripInput {
    let mut input = TripInput {
        body_temp_f: args.tbody,
        ambient_temp_f: args.tout,
        duration_hr: args.duration,
        ..TripInput::default()
    };

    input.insulation.set_r(LayerSlot::Jacket, args.jacket);
    input.insulation.set_r(LayerSlot::Bag, args.bag);
    input.insulation.set_r(LayerSlot::Pad, args.pad);
    input.insulation.set_r(LayerSlot::Layers, args.layers);
    input.insulation.set_r(LayerSlot::Extremities, args.extremities);
    input.insulation.set_r(LayerSlot::Shelter, args.shelter);

    input.exposure.wind_mph = args.wind;
    input.exposure.condition = WeatherCondition::parse_lenient(&args.condition);

    input.profile.age_group = AgeGroup::parse_lenient(&args.profile);
    input.profile.height = parse_height(&args.height);
    input.profile.sex = parse_sex(&args.sex);
    input.profile.weight_lb = args.weight;

    input
}

fn parse_height(tag: &str) -> HeightClass {
    match tag.to_lowercase().as_str() {
        "short" => HeightClass::Short,
        "tall" => HeightClass::Tall,
        "regular" | "average" | "medium" => HeightClass::Regular,
        other => {
            println!("Unknown height '{}', using regular", other);
            HeightClass::Regular
        }
    }
}

fn parse_sex(tag: &str) -> Sex {
    match tag.to_lowercase().as_str() {
        "female" | "f" => Sex::Female,
        "male" | "m" => Sex::Male,
        other => {
            println!("Unknown sex '{}', using male", other);
            Sex::Male
        }
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Walk through every input with a prompt, current values as defaults
fn prompt_for_input(input: &mut TripInput) {
    println!("R-values per slot (blank keeps the shown value):");
    for slot in LayerSlot::ALL {
        let current = input.insulation.get(slot);
        let value = prompt_f64(&format!("  {} R [{}]: ", slot.display_name(), current), current);
        input.insulation.set_r(slot, value);
    }
    println!();

    let codes: Vec<&str> = WeatherCondition::ALL.iter().map(|c| c.code()).collect();
    println!("Conditions: {}", codes.join(", "));
    let condition = prompt_str(
        &format!("Condition [{}]: ", input.exposure.condition.code()),
        input.exposure.condition.code(),
    );
    input.exposure.condition = WeatherCondition::parse_lenient(&condition);
    input.exposure.wind_mph = prompt_f64(
        &format!("Wind (mph) [{}]: ", input.exposure.wind_mph),
        input.exposure.wind_mph,
    );
    input.ambient_temp_f = prompt_f64(
        &format!("Ambient temperature (°F) [{}]: ", input.ambient_temp_f),
        input.ambient_temp_f,
    );
    input.body_temp_f = prompt_f64(
        &format!("Body temperature (°F) [{}]: ", input.body_temp_f),
        input.body_temp_f,
    );
    input.duration_hr = prompt_f64(
        &format!("Duration (hr) [{}]: ", input.duration_hr),
        input.duration_hr,
    );
    println!();

    let profile = prompt_str(
        &format!("Profile (kid/adult/senior) [{}]: ", input.profile.age_group.code()),
        input.profile.age_group.code(),
    );
    input.profile.age_group = AgeGroup::parse_lenient(&profile);
    let height = prompt_str(
        &format!("Height (short/regular/tall) [{}]: ", input.profile.height.code()),
        input.profile.height.code(),
    );
    input.profile.height = parse_height(&height);
    let sex = prompt_str(
        &format!("Sex (male/female) [{}]: ", input.profile.sex.code()),
        input.profile.sex.code(),
    );
    input.profile.sex = parse_sex(&sex);

    let weight_default = match input.profile.weight_lb {
        Some(weight) => weight.to_string(),
        None => "none".to_string(),
    };
    let weight = prompt_str(
        &format!("Weight (lb, 'none' to skip) [{}]: ", weight_default),
        &weight_default,
    );
    input.profile.weight_lb = weight.parse::<f64>().ok();
}

fn list_setups(path: &Path) {
    let store = SetupStore::load(path);
    if store.is_empty() {
        println!("No saved setups.");
        return;
    }

    println!("Saved setups in {}:", path.display());
    for (name, setup) in &store.setups {
        match &setup.saved_at {
            Some(at) => println!("  {:<24} saved {}", name, at.format("%Y-%m-%d %H:%M UTC")),
            None => println!("  {}", name),
        }
    }
}

fn list_brands(path: &Path) {
    let catalog = BrandCatalog::load(path);
    println!("Brand catalog ({} entries):", catalog.len());
    for (key, info) in catalog.entries() {
        println!("  {:<26} {:<6} R {:>4.1}  {}", key, info.kind.code(), info.r_value, info.note);
    }
}

fn print_result(input: &TripInput, result: &TripResult, explain: bool) {
    let weight_note = match input.profile.weight_lb {
        Some(weight) => format!(", {:.0} lb", weight),
        None => String::new(),
    };

    println!("═══════════════════════════════════════");
    println!("  THERMAL BALANCE RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!(
        "  Weather:  {} @ {:.1} mph",
        input.exposure.condition.display_name(),
        input.exposure.wind_mph
    );
    println!(
        "  Ambient:  {:.1} °F for {} hr",
        input.ambient_temp_f, input.duration_hr
    );
    println!(
        "  Profile:  {} ({}, {}{})",
        input.profile.age_group.display_name(),
        input.profile.height.code(),
        input.profile.sex.code(),
        weight_note
    );
    println!("  Area:     {:.1} ft²", result.surface_area_ft2);
    println!();

    if explain {
        println!("{}", input.exposure.summary(result.total_r).format_report());
        println!();
    }

    println!("{}", result.format_report());
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} (net {:+.0} BTU)",
        if result.is_surplus() { "WARM ENOUGH" } else { "AT RISK" },
        result.net_btu
    );
    println!("═══════════════════════════════════════");
}

fn exit_with_error(e: &BalanceError) -> ! {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    std::process::exit(1);
}
