//! # Trip Thermal Balance Calculation
//!
//! Composes the four core operations for one trip: aggregate the insulation
//! R-values, derate for wind and weather, look up biometric defaults, and
//! compute the Newtonian heat-loss rate. Totals over the trip duration and
//! the net balance (metabolic minus loss) are derived from the hourly rates.
//!
//! ## Assumptions
//!
//! - Steady state: one rate for the whole trip, no time simulation
//! - Fixed units: °F, BTU/hr, ft²
//! - Flat-plate conduction: rate = ΔT × area / R_eff
//!
//! ## Example
//!
//! ```rust
//! use coldcheck_core::insulation::{InsulationSet, LayerSlot};
//! use coldcheck_core::trip::{calculate, TripInput};
//!
//! let input = TripInput {
//!     insulation: InsulationSet::new()
//!         .with_r(LayerSlot::Bag, 4.0)
//!         .with_r(LayerSlot::Pad, 3.5),
//!     ..TripInput::default()
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Hourly heat loss: {:.1} BTU/hr", result.loss_btu_hr);
//! println!("Net over trip: {:+.0} BTU", result.net_btu);
//! assert!(result.effective_r > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::biometrics::BodyProfile;
use crate::errors::{BalanceError, BalanceResult};
use crate::insulation::InsulationSet;
use crate::weather::Exposure;

/// Default body core temperature (°F)
pub const DEFAULT_BODY_TEMP_F: f64 = 98.6;

/// Default ambient temperature (°F)
pub const DEFAULT_AMBIENT_TEMP_F: f64 = 32.0;

/// Default trip duration (hours)
pub const DEFAULT_DURATION_HR: f64 = 12.0;

/// Input parameters for one trip calculation.
///
/// All temperatures are °F and the duration is in hours. Temperatures are
/// unconstrained reals; an ambient above body temperature legitimately
/// produces a negative loss rate (heat gain).
///
/// ## JSON Example
///
/// ```json
/// {
///   "insulation": { "layers": { "bag": 4.0, "pad": 3.5 } },
///   "exposure": { "wind_mph": 5.0, "condition": "calm" },
///   "profile": { "age_group": "adult", "height": "regular", "sex": "male", "weight_lb": null },
///   "body_temp_f": 98.6,
///   "ambient_temp_f": 32.0,
///   "duration_hr": 12.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripInput {
    /// Insulation R-values by slot
    pub insulation: InsulationSet,

    /// Wind speed and weather condition
    pub exposure: Exposure,

    /// Who is on the trip
    pub profile: BodyProfile,

    /// Body core temperature (°F)
    pub body_temp_f: f64,

    /// Ambient (outside) temperature (°F)
    pub ambient_temp_f: f64,

    /// Trip duration in hours
    pub duration_hr: f64,
}

impl Default for TripInput {
    fn default() -> Self {
        TripInput {
            insulation: InsulationSet::default(),
            exposure: Exposure::default(),
            profile: BodyProfile::default(),
            body_temp_f: DEFAULT_BODY_TEMP_F,
            ambient_temp_f: DEFAULT_AMBIENT_TEMP_F,
            duration_hr: DEFAULT_DURATION_HR,
        }
    }
}

impl TripInput {
    /// Validate input parameters.
    pub fn validate(&self) -> BalanceResult<()> {
        self.insulation.validate()?;
        self.profile.validate()?;
        if self.duration_hr <= 0.0 {
            return Err(BalanceError::invalid_input(
                "duration_hr",
                self.duration_hr.to_string(),
                "Duration must be positive",
            ));
        }
        Ok(())
    }
}

/// Hourly heat-loss rate through an effective R-value.
///
/// `rate = (body_temp - ambient_temp) × area / effective_r`
///
/// The composed pipeline always passes an R pre-floored at 0.01, so the
/// division is safe there. Called standalone with an externally supplied
/// R ≤ 0 this returns a domain error instead of dividing.
pub fn heat_loss_rate(
    body_temp_f: f64,
    ambient_temp_f: f64,
    surface_area_ft2: f64,
    effective_r: f64,
) -> BalanceResult<f64> {
    if effective_r <= 0.0 {
        return Err(BalanceError::domain(
            "effective_r",
            format!("Effective R must be positive, got {}", effective_r),
        ));
    }
    Ok((body_temp_f - ambient_temp_f) * surface_area_ft2 / effective_r)
}

/// Results from one trip calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_r": 9.9,
///   "effective_r": 9.075,
///   "surface_area_ft2": 19.0,
///   "loss_btu_hr": 139.4,
///   "metabolic_btu_hr": 220.0,
///   "duration_hr": 12.0,
///   "total_loss_btu": 1673.3,
///   "total_metabolic_btu": 2640.0,
///   "net_btu": 966.7
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResult {
    // === Insulation ===
    /// Aggregate R-value of all slots
    pub total_r: f64,

    /// R-value after wind/weather derating (≥ 0.01)
    pub effective_r: f64,

    // === Hourly Rates ===
    /// Body surface area used (ft²)
    pub surface_area_ft2: f64,

    /// Heat-loss rate (BTU/hr); negative means heat gain
    pub loss_btu_hr: f64,

    /// Metabolic output (BTU/hr)
    pub metabolic_btu_hr: f64,

    // === Trip Totals ===
    /// Trip duration the totals cover (hours)
    pub duration_hr: f64,

    /// Heat lost over the trip (BTU)
    pub total_loss_btu: f64,

    /// Heat generated over the trip (BTU)
    pub total_metabolic_btu: f64,

    /// Metabolic minus loss; positive means warm enough
    pub net_btu: f64,
}

impl TripResult {
    /// Whether metabolic output covers the heat loss (holding even counts)
    pub fn is_surplus(&self) -> bool {
        self.net_btu >= 0.0
    }

    /// Format as a multi-line string for display
    ///
    /// Two-decimal R-values, one-decimal hourly loss, integer totals,
    /// signed net.
    pub fn format_report(&self) -> String {
        format!(
            "Total R: {:.2} (effective: {:.2})\n\
             Hourly heat loss: {:.1} BTU/hr\n\
             Total heat loss for {} hr: {:.0} BTU\n\
             Metabolic: {:.0} BTU/hr ({:.0} total)\n\
             Net over trip: {:+.0} BTU",
            self.total_r,
            self.effective_r,
            self.loss_btu_hr,
            self.duration_hr,
            self.total_loss_btu,
            self.metabolic_btu_hr,
            self.total_metabolic_btu,
            self.net_btu,
        )
    }
}

/// Calculate the thermal balance for a trip.
///
/// This is a pure function: same input, same result, no hidden state.
/// Operations run in the fixed order aggregate → derate → biometrics →
/// heat loss, then the duration totals are derived.
///
/// # Arguments
///
/// * `input` - Insulation, exposure, profile, temperatures, and duration
///
/// # Returns
///
/// * `Ok(TripResult)` - Rates, totals, and the net balance
/// * `Err(BalanceError)` - Structured error if inputs are invalid
pub fn calculate(input: &TripInput) -> BalanceResult<TripResult> {
    input.validate()?;

    let total_r = input.insulation.total_r();
    let effective_r = input.exposure.effective_r(total_r);
    let body = input.profile.defaults();

    let loss_btu_hr = heat_loss_rate(
        input.body_temp_f,
        input.ambient_temp_f,
        body.surface_area_ft2,
        effective_r,
    )?;

    let total_loss_btu = loss_btu_hr * input.duration_hr;
    let total_metabolic_btu = body.metabolic_btu_hr * input.duration_hr;

    Ok(TripResult {
        total_r,
        effective_r,
        surface_area_ft2: body.surface_area_ft2,
        loss_btu_hr,
        metabolic_btu_hr: body.metabolic_btu_hr,
        duration_hr: input.duration_hr,
        total_loss_btu,
        total_metabolic_btu,
        net_btu: total_metabolic_btu - total_loss_btu,
    })
}
