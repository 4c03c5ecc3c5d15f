//! # Biometric Defaults
//!
//! Body surface area and resting metabolic rate lookup by age group,
//! height class, sex, and optional weight.
//!
//! ## Lookup Table
//!
//! | Age group | Height (short/regular/tall) | Area (ft²)     |
//! |-----------|-----------------------------|----------------|
//! | kid       | ignored                     | 14.0           |
//! | adult     | short/regular/tall          | 17.0/19.0/22.0 |
//! | senior    | short/regular/tall          | 16.0/18.0/21.0 |
//!
//! | Age group | Metabolic male/female (BTU/hr) | Weight divisor (lb) |
//! |-----------|--------------------------------|---------------------|
//! | kid       | 160.0                          | none                |
//! | adult     | 220.0/200.0                    | 170.0               |
//! | senior    | 200.0/180.0                    | 150.0               |
//!
//! A present weight scales the metabolic rate by `weight / divisor`,
//! clamped to [0.8, 1.2]. Unrecognized age tags fall back to 20.0 ft² and
//! 200.0 BTU/hr with no scaling.

use serde::{Deserialize, Serialize};

use crate::errors::{BalanceError, BalanceResult};

/// Age group selecting the biometric table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// Child; height, sex, and weight are ignored
    Kid,
    /// Adult
    #[default]
    Adult,
    /// Senior; lower base rate, lighter reference weight
    Senior,
    /// Unrecognized tag from a file or older version
    #[serde(other)]
    Unspecified,
}

impl AgeGroup {
    /// All selectable age groups
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Kid, AgeGroup::Adult, AgeGroup::Senior];

    /// Tag string used in saved setups and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            AgeGroup::Kid => "kid",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
            AgeGroup::Unspecified => "unspecified",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            AgeGroup::Kid => "Kid",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
            AgeGroup::Unspecified => "Unspecified",
        }
    }

    /// Parse a tag, falling back to `Unspecified` on no match
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "kid" => AgeGroup::Kid,
            "adult" => AgeGroup::Adult,
            "senior" => AgeGroup::Senior,
            _ => {
                tracing::warn!(tag, "unrecognized age group, using generic defaults");
                AgeGroup::Unspecified
            }
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Height class selecting the surface area column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeightClass {
    /// Below average height
    Short,
    /// Average height
    #[default]
    Regular,
    /// Above average height
    Tall,
}

impl HeightClass {
    /// All height classes
    pub const ALL: [HeightClass; 3] = [HeightClass::Short, HeightClass::Regular, HeightClass::Tall];

    /// Tag string used in saved setups and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            HeightClass::Short => "short",
            HeightClass::Regular => "regular",
            HeightClass::Tall => "tall",
        }
    }
}

impl std::fmt::Display for HeightClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Sex selecting the base metabolic rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Both entries
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Tag string used in saved setups and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Surface area and metabolic rate from the biometric lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDefaults {
    /// Heat-exchanging body surface area (ft²)
    pub surface_area_ft2: f64,
    /// Resting metabolic output (BTU/hr)
    pub metabolic_btu_hr: f64,
}

/// Who is on the trip
///
/// Bundles the biometric tags with an optional weight. `weight_lb` is
/// strictly optional; `None` means "use the unscaled base rate", never zero.
///
/// # Example
/// ```
/// use coldcheck_core::biometrics::{AgeGroup, BodyProfile, HeightClass, Sex};
///
/// let profile = BodyProfile::default(); // adult, regular, male, no weight
/// let defaults = profile.defaults();
/// assert_eq!(defaults.surface_area_ft2, 19.0);
/// assert_eq!(defaults.metabolic_btu_hr, 220.0);
///
/// let tall_senior = BodyProfile::default()
///     .with_age_group(AgeGroup::Senior)
///     .with_height(HeightClass::Tall)
///     .with_sex(Sex::Female);
/// assert_eq!(tall_senior.defaults().surface_area_ft2, 21.0);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Age group (table row)
    pub age_group: AgeGroup,

    /// Height class (surface area column), ignored for kids
    pub height: HeightClass,

    /// Sex (base metabolic rate), ignored for kids
    pub sex: Sex,

    /// Body weight in pounds, if known; scales the metabolic rate
    pub weight_lb: Option<f64>,
}

impl BodyProfile {
    /// Set age group (builder pattern)
    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = age_group;
        self
    }

    /// Set height class (builder pattern)
    pub fn with_height(mut self, height: HeightClass) -> Self {
        self.height = height;
        self
    }

    /// Set sex (builder pattern)
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Set weight in pounds (builder pattern)
    pub fn with_weight(mut self, weight_lb: f64) -> Self {
        self.weight_lb = Some(weight_lb);
        self
    }

    /// Validate the profile
    ///
    /// A present weight must be positive. Absent weight is always valid.
    pub fn validate(&self) -> BalanceResult<()> {
        if let Some(weight) = self.weight_lb {
            if weight <= 0.0 {
                return Err(BalanceError::invalid_input(
                    "weight_lb",
                    weight.to_string(),
                    "Weight must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Look up surface area and metabolic rate for this profile.
    ///
    /// Total over all inputs; never fails. Kids use fixed values regardless
    /// of height, sex, or weight. Unspecified age groups get the generic
    /// (20.0 ft², 200.0 BTU/hr) fallback with no weight scaling.
    pub fn defaults(&self) -> BodyDefaults {
        match self.age_group {
            AgeGroup::Kid => BodyDefaults {
                surface_area_ft2: 14.0,
                metabolic_btu_hr: 160.0,
            },
            AgeGroup::Adult => BodyDefaults {
                surface_area_ft2: self.area_by_height(17.0, 19.0, 22.0),
                metabolic_btu_hr: self.scaled_metabolic(220.0, 200.0, 170.0),
            },
            AgeGroup::Senior => BodyDefaults {
                surface_area_ft2: self.area_by_height(16.0, 18.0, 21.0),
                metabolic_btu_hr: self.scaled_metabolic(200.0, 180.0, 150.0),
            },
            AgeGroup::Unspecified => BodyDefaults {
                surface_area_ft2: 20.0,
                metabolic_btu_hr: 200.0,
            },
        }
    }

    /// Pick the surface area column for this height class
    fn area_by_height(&self, short_ft2: f64, regular_ft2: f64, tall_ft2: f64) -> f64 {
        match self.height {
            HeightClass::Short => short_ft2,
            HeightClass::Regular => regular_ft2,
            HeightClass::Tall => tall_ft2,
        }
    }

    /// Base metabolic rate by sex, scaled by weight when present
    ///
    /// The scale factor weight/divisor is held to [0.8, 1.2].
    fn scaled_metabolic(&self, male_btu_hr: f64, female_btu_hr: f64, divisor_lb: f64) -> f64 {
        let base = match self.sex {
            Sex::Male => male_btu_hr,
            Sex::Female => female_btu_hr,
        };
        match self.weight_lb {
            Some(weight) => base * (weight / divisor_lb).min(1.2).max(0.8),
            None => base,
        }
    }
}
