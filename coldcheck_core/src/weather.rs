//! # Wind and Weather Derating
//!
//! Insulation performs worse in wind and moisture. This module derates an
//! aggregate R-value to an effective R-value:
//!
//! ```text
//! R_eff = max(0.01, R × (1 - wind_reduction) × moisture_multiplier)
//! ```
//!
//! ## Derating Summary
//!
//! | Condition | Wind reduction        | Moisture multiplier |
//! |-----------|-----------------------|---------------------|
//! | calm      | min(0.6, wind/60)     | 1.0                 |
//! | light     | min(0.6, wind/60) / 2 | 1.0                 |
//! | windy     | min(0.8, wind/40)     | 1.0                 |
//! | gale      | min(0.8, wind/40)     | 1.0                 |
//! | rain      | min(0.6, wind/60)     | 0.8                 |
//! | snow      | min(0.6, wind/60)     | 0.95                |
//! | wet_cold  | min(0.6, wind/60)     | 0.8                 |
//!
//! Unrecognized condition tags behave like `calm`.

use serde::{Deserialize, Serialize};

use crate::insulation::InsulationSet;

/// Floor applied to every effective R-value.
///
/// Keeps the downstream heat-loss division safe for any real input.
pub const MIN_EFFECTIVE_R: f64 = 0.01;

/// Default wind speed assumed when none is given (mph)
pub const DEFAULT_WIND_MPH: f64 = 5.0;

/// Weather condition tag governing the derating policy
///
/// Conditions are mutually exclusive; pick the one that dominates the trip.
/// `windy` and `gale` switch to the steeper wind reduction curve, the wet
/// conditions add a multiplier on top of the wind reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Still air, sheltered camp
    #[default]
    Calm,
    /// Light breeze, half the calm wind reduction
    Light,
    /// Sustained wind, steeper reduction curve
    Windy,
    /// Storm-force wind, same curve as windy
    Gale,
    /// Rain, wets insulation (x0.8)
    Rain,
    /// Snow, mild loft penalty (x0.95)
    Snow,
    /// Wet cold (sleet, freezing fog), same penalty as rain
    WetCold,
    /// Unrecognized tag from a file or older version, treated as calm
    #[serde(other)]
    Unknown,
}

impl WeatherCondition {
    /// All selectable conditions in standard order
    pub const ALL: [WeatherCondition; 7] = [
        WeatherCondition::Calm,
        WeatherCondition::Light,
        WeatherCondition::Windy,
        WeatherCondition::Gale,
        WeatherCondition::Rain,
        WeatherCondition::Snow,
        WeatherCondition::WetCold,
    ];

    /// Tag string used in saved setups and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            WeatherCondition::Calm => "calm",
            WeatherCondition::Light => "light",
            WeatherCondition::Windy => "windy",
            WeatherCondition::Gale => "gale",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Snow => "snow",
            WeatherCondition::WetCold => "wet_cold",
            WeatherCondition::Unknown => "unknown",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            WeatherCondition::Calm => "Calm",
            WeatherCondition::Light => "Light breeze",
            WeatherCondition::Windy => "Windy",
            WeatherCondition::Gale => "Gale",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::WetCold => "Wet cold",
            WeatherCondition::Unknown => "Unknown (treated as calm)",
        }
    }

    /// Parse a free-form tag, falling back to `Unknown` on no match
    ///
    /// Matching is case-insensitive and accepts both `wet_cold` and
    /// `wet-cold`. Unrecognized tags degrade to calm behavior rather than
    /// failing.
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "calm" => WeatherCondition::Calm,
            "light" => WeatherCondition::Light,
            "windy" => WeatherCondition::Windy,
            "gale" => WeatherCondition::Gale,
            "rain" => WeatherCondition::Rain,
            "snow" => WeatherCondition::Snow,
            "wet_cold" | "wet-cold" => WeatherCondition::WetCold,
            _ => {
                tracing::warn!(tag, "unrecognized weather condition, treating as calm");
                WeatherCondition::Unknown
            }
        }
    }

    /// Fraction of the aggregate R-value lost to wind
    ///
    /// Calm-family conditions use min(0.6, wind/60); a light breeze halves
    /// that; windy and gale override it with min(0.8, wind/40).
    pub fn wind_reduction(&self, wind_mph: f64) -> f64 {
        match self {
            WeatherCondition::Windy | WeatherCondition::Gale => (wind_mph / 40.0).min(0.8),
            WeatherCondition::Light => (wind_mph / 60.0).min(0.6) * 0.5,
            _ => (wind_mph / 60.0).min(0.6),
        }
    }

    /// Multiplier applied after the wind reduction
    pub fn moisture_multiplier(&self) -> f64 {
        match self {
            WeatherCondition::Rain | WeatherCondition::WetCold => 0.8,
            WeatherCondition::Snow => 0.95,
            _ => 1.0,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Derate an aggregate R-value for wind and weather.
///
/// Applies the wind reduction for `condition`, then its moisture multiplier,
/// then floors the result at [`MIN_EFFECTIVE_R`]. Total over all real
/// inputs; a zero or negative `total_r` simply comes back as the floor.
///
/// # Example
///
/// ```
/// use coldcheck_core::weather::{effective_r, WeatherCondition};
///
/// let r_eff = effective_r(9.9, 5.0, WeatherCondition::Calm);
/// assert!((r_eff - 9.075).abs() < 1e-9);
/// ```
pub fn effective_r(total_r: f64, wind_mph: f64, condition: WeatherCondition) -> f64 {
    let reduction = condition.wind_reduction(wind_mph);
    let derated = total_r * (1.0 - reduction) * condition.moisture_multiplier();
    derated.max(MIN_EFFECTIVE_R)
}

/// Wind speed and weather condition for a trip
///
/// Defaults to 5 mph of wind under a calm sky.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Exposure {
    /// Sustained wind speed in mph
    pub wind_mph: f64,

    /// Dominant weather condition
    pub condition: WeatherCondition,
}

impl Default for Exposure {
    fn default() -> Self {
        Exposure {
            wind_mph: DEFAULT_WIND_MPH,
            condition: WeatherCondition::default(),
        }
    }
}

impl Exposure {
    /// Create an exposure with explicit wind and condition
    pub fn new(wind_mph: f64, condition: WeatherCondition) -> Self {
        Exposure { wind_mph, condition }
    }

    /// Set wind speed (builder pattern)
    pub fn with_wind(mut self, wind_mph: f64) -> Self {
        self.wind_mph = wind_mph;
        self
    }

    /// Set weather condition (builder pattern)
    pub fn with_condition(mut self, condition: WeatherCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Derate an aggregate R-value under this exposure
    pub fn effective_r(&self, total_r: f64) -> f64 {
        effective_r(total_r, self.wind_mph, self.condition)
    }

    /// Derate a full insulation set under this exposure
    pub fn effective_r_for(&self, insulation: &InsulationSet) -> f64 {
        self.effective_r(insulation.total_r())
    }

    /// Step-by-step record of the derating for reporting
    pub fn summary(&self, total_r: f64) -> DeratingBreakdown {
        let wind_reduction = self.condition.wind_reduction(self.wind_mph);
        let moisture_multiplier = self.condition.moisture_multiplier();
        let raw = total_r * (1.0 - wind_reduction) * moisture_multiplier;
        let effective = raw.max(MIN_EFFECTIVE_R);

        DeratingBreakdown {
            condition: self.condition,
            wind_mph: self.wind_mph,
            total_r,
            wind_reduction,
            moisture_multiplier,
            floored: raw < MIN_EFFECTIVE_R,
            effective_r: effective,
        }
    }
}

/// Summary of one derating for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeratingBreakdown {
    /// Condition the derating was computed for
    pub condition: WeatherCondition,
    /// Wind speed used (mph)
    pub wind_mph: f64,
    /// Aggregate R-value before derating
    pub total_r: f64,
    /// Fraction of R lost to wind
    pub wind_reduction: f64,
    /// Moisture multiplier applied after the wind reduction
    pub moisture_multiplier: f64,
    /// Whether the 0.01 floor kicked in
    pub floored: bool,
    /// Final effective R-value
    pub effective_r: f64,
}

impl DeratingBreakdown {
    /// Format as a multi-line string for reports
    pub fn format_report(&self) -> String {
        format!(
            "Wind/Weather Derating ({} @ {:.1} mph)\n\
             ================================================\n\
             Total R                 = {:.2}\n\
             Wind reduction          = {:.3}\n\
             Moisture multiplier     = {:.2}\n\
             ------------------------------------------------\n\
             Effective R             = {:.2}{}",
            self.condition.code(),
            self.wind_mph,
            self.total_r,
            self.wind_reduction,
            self.moisture_multiplier,
            self.effective_r,
            if self.floored { "  (floored)" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_wind_reduction() {
        let red = WeatherCondition::Calm.wind_reduction(5.0);
        assert!((red - 5.0 / 60.0).abs() < 1e-12);

        // Capped at 0.6
        assert_eq!(WeatherCondition::Calm.wind_reduction(60.0), 0.6);
        assert_eq!(WeatherCondition::Calm.wind_reduction(200.0), 0.6);
    }

    #[test]
    fn test_light_halves_reduction() {
        let base = WeatherCondition::Calm.wind_reduction(6.0);
        let light = WeatherCondition::Light.wind_reduction(6.0);
        assert!((light - base / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_windy_and_gale_override() {
        // 40 mph on the steep curve is exactly the 0.8 cap
        assert_eq!(WeatherCondition::Windy.wind_reduction(40.0), 0.8);
        assert_eq!(WeatherCondition::Gale.wind_reduction(40.0), 0.8);
        assert_eq!(WeatherCondition::Gale.wind_reduction(100.0), 0.8);

        let red = WeatherCondition::Gale.wind_reduction(20.0);
        assert!((red - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_moisture_multipliers() {
        assert_eq!(WeatherCondition::Rain.moisture_multiplier(), 0.8);
        assert_eq!(WeatherCondition::WetCold.moisture_multiplier(), 0.8);
        assert_eq!(WeatherCondition::Snow.moisture_multiplier(), 0.95);
        assert_eq!(WeatherCondition::Calm.moisture_multiplier(), 1.0);
        assert_eq!(WeatherCondition::Gale.moisture_multiplier(), 1.0);
    }

    #[test]
    fn test_effective_r_calm_known_value() {
        let r_eff = effective_r(9.9, 5.0, WeatherCondition::Calm);
        assert!((r_eff - 9.075).abs() < 1e-9);
    }

    #[test]
    fn test_effective_r_composes_wind_then_moisture() {
        // 10 * (1 - 0.6) * 0.95 = 3.8
        let r_eff = effective_r(10.0, 60.0, WeatherCondition::Snow);
        assert!((r_eff - 3.8).abs() < 1e-12);

        // No wind: only the rain multiplier applies
        let r_eff = effective_r(10.0, 0.0, WeatherCondition::Rain);
        assert!((r_eff - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_effective_r_floor() {
        assert_eq!(effective_r(0.0, 5.0, WeatherCondition::Calm), MIN_EFFECTIVE_R);
        assert_eq!(effective_r(-5.0, 100.0, WeatherCondition::Rain), MIN_EFFECTIVE_R);
        assert!(effective_r(0.02, 60.0, WeatherCondition::WetCold) >= MIN_EFFECTIVE_R);
    }

    #[test]
    fn test_unknown_behaves_like_calm() {
        let wind = 25.0;
        assert_eq!(
            WeatherCondition::Unknown.wind_reduction(wind),
            WeatherCondition::Calm.wind_reduction(wind)
        );
        assert_eq!(
            WeatherCondition::Unknown.moisture_multiplier(),
            WeatherCondition::Calm.moisture_multiplier()
        );
        assert_eq!(
            effective_r(9.9, wind, WeatherCondition::Unknown),
            effective_r(9.9, wind, WeatherCondition::Calm)
        );
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(WeatherCondition::parse_lenient("Calm"), WeatherCondition::Calm);
        assert_eq!(WeatherCondition::parse_lenient("GALE"), WeatherCondition::Gale);
        assert_eq!(WeatherCondition::parse_lenient("wet_cold"), WeatherCondition::WetCold);
        assert_eq!(WeatherCondition::parse_lenient("wet-cold"), WeatherCondition::WetCold);
        assert_eq!(WeatherCondition::parse_lenient("blizzard"), WeatherCondition::Unknown);
    }

    #[test]
    fn test_serialization_tags() {
        let json = serde_json::to_string(&WeatherCondition::WetCold).unwrap();
        assert_eq!(json, "\"wet_cold\"");

        let parsed: WeatherCondition = serde_json::from_str("\"gale\"").unwrap();
        assert_eq!(parsed, WeatherCondition::Gale);

        // Unrecognized tags widen to Unknown instead of failing
        let parsed: WeatherCondition = serde_json::from_str("\"blizzard\"").unwrap();
        assert_eq!(parsed, WeatherCondition::Unknown);
    }

    #[test]
    fn test_exposure_default() {
        let exposure = Exposure::default();
        assert_eq!(exposure.wind_mph, DEFAULT_WIND_MPH);
        assert_eq!(exposure.condition, WeatherCondition::Calm);
    }

    #[test]
    fn test_exposure_builders() {
        let exposure = Exposure::default()
            .with_wind(25.0)
            .with_condition(WeatherCondition::Windy);

        assert_eq!(exposure.wind_mph, 25.0);
        assert_eq!(exposure.condition, WeatherCondition::Windy);
        assert!((exposure.effective_r(10.0) - 10.0 * (1.0 - 25.0 / 40.0)).abs() < 1e-12);
    }

    #[test]
    fn test_derating_breakdown() {
        let exposure = Exposure::new(40.0, WeatherCondition::Gale);
        let breakdown = exposure.summary(9.9);

        assert_eq!(breakdown.wind_reduction, 0.8);
        assert_eq!(breakdown.moisture_multiplier, 1.0);
        assert!(!breakdown.floored);
        assert!((breakdown.effective_r - 9.9 * 0.2).abs() < 1e-12);

        let report = breakdown.format_report();
        assert!(report.contains("gale"));
        assert!(report.contains("Effective R"));
    }

    #[test]
    fn test_derating_breakdown_floored() {
        let exposure = Exposure::new(5.0, WeatherCondition::Calm);
        let breakdown = exposure.summary(0.0);

        assert!(breakdown.floored);
        assert_eq!(breakdown.effective_r, MIN_EFFECTIVE_R);
        assert!(breakdown.format_report().contains("(floored)"));
    }
}
