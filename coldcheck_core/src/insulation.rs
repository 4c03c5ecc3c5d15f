//! Insulation layers and R-value aggregation
//!
//! This module defines the six insulation slots a trip setup can fill
//! (jacket, sleeping bag, pad, base/mid layers, extremities, shelter) and
//! the [`InsulationSet`] that holds their R-values.
//!
//! # Example
//!
//! ```
//! use coldcheck_core::insulation::{InsulationSet, LayerSlot};
//!
//! let set = InsulationSet::new()
//!     .with_r(LayerSlot::Bag, 4.0)
//!     .with_r(LayerSlot::Pad, 3.5);
//!
//! assert_eq!(set.get(LayerSlot::Bag), 4.0);
//! assert_eq!(set.get(LayerSlot::Jacket), 0.0); // Not specified, defaults to 0
//! assert!((set.total_r() - 7.5).abs() < 1e-12);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{BalanceError, BalanceResult};

/// Insulation slots in standard listing order
///
/// Each slot corresponds to one piece of a cold-weather setup. Slots are
/// independent; the aggregate R-value is their plain sum.
///
/// # Example
/// ```
/// use coldcheck_core::insulation::LayerSlot;
///
/// let pad = LayerSlot::Pad;
/// assert_eq!(pad.code(), "pad");
/// assert_eq!(pad.display_name(), "Sleeping pad");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSlot {
    /// Insulated jacket worn in camp
    Jacket,
    /// Sleeping bag or quilt
    Bag,
    /// Sleeping pad (the slot brand catalog entries apply to)
    Pad,
    /// Base and mid layers worn under the jacket
    Layers,
    /// Extremities (hat, gloves, booties)
    Extremities,
    /// Shelter (tent, bivy, tarp)
    Shelter,
}

impl LayerSlot {
    /// All slots in standard order
    pub const ALL: [LayerSlot; 6] = [
        LayerSlot::Jacket,
        LayerSlot::Bag,
        LayerSlot::Pad,
        LayerSlot::Layers,
        LayerSlot::Extremities,
        LayerSlot::Shelter,
    ];

    /// Short field code used in saved setups and CLI flags
    pub fn code(&self) -> &'static str {
        match self {
            LayerSlot::Jacket => "jacket",
            LayerSlot::Bag => "bag",
            LayerSlot::Pad => "pad",
            LayerSlot::Layers => "layers",
            LayerSlot::Extremities => "extremities",
            LayerSlot::Shelter => "shelter",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            LayerSlot::Jacket => "Jacket",
            LayerSlot::Bag => "Sleeping bag",
            LayerSlot::Pad => "Sleeping pad",
            LayerSlot::Layers => "Base/mid layers",
            LayerSlot::Extremities => "Extremities",
            LayerSlot::Shelter => "Shelter",
        }
    }
}

impl std::fmt::Display for LayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// R-values by insulation slot for one trip setup
///
/// Stores per-slot thermal resistance. Unset slots contribute 0.0 to the
/// aggregate. Values are plain R (ft²·°F·hr/BTU); no unit conversion happens
/// here.
///
/// # Example
/// ```
/// use coldcheck_core::insulation::{InsulationSet, LayerSlot};
///
/// let set = InsulationSet::new()
///     .with_r(LayerSlot::Jacket, 0.5)
///     .with_r(LayerSlot::Bag, 4.0);
///
/// assert_eq!(set.get(LayerSlot::Jacket), 0.5);
/// assert_eq!(set.get(LayerSlot::Shelter), 0.0);
/// ```
///
/// # JSON Format
/// ```json
/// {
///   "layers": {
///     "jacket": 0.5,
///     "bag": 4.0
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsulationSet {
    /// R-values keyed by slot
    pub layers: HashMap<LayerSlot, f64>,
}

impl InsulationSet {
    /// Create an empty insulation set
    pub fn new() -> Self {
        InsulationSet {
            layers: HashMap::new(),
        }
    }

    /// Add or update a slot R-value (builder pattern)
    pub fn with_r(mut self, slot: LayerSlot, r_value: f64) -> Self {
        self.layers.insert(slot, r_value);
        self
    }

    /// Set a slot R-value (mutable)
    pub fn set_r(&mut self, slot: LayerSlot, r_value: f64) {
        self.layers.insert(slot, r_value);
    }

    /// Get the R-value for a slot, defaulting to 0.0 if not set
    pub fn get(&self, slot: LayerSlot) -> f64 {
        self.layers.get(&slot).copied().unwrap_or(0.0)
    }

    /// Check if a slot is set (even if zero)
    pub fn has(&self, slot: LayerSlot) -> bool {
        self.layers.contains_key(&slot)
    }

    /// Validate the set
    ///
    /// Checks that no slot carries a negative R-value. The sum itself does
    /// not clamp (see [`total_r`](Self::total_r)); this is the typed boundary
    /// where bad values are rejected.
    pub fn validate(&self) -> BalanceResult<()> {
        for (slot, value) in &self.layers {
            if *value < 0.0 {
                return Err(BalanceError::invalid_input(
                    slot.code(),
                    value.to_string(),
                    format!("{} R-value cannot be negative", slot.display_name()),
                ));
            }
        }
        Ok(())
    }

    /// Sum all slot R-values (unset slots contribute 0.0)
    ///
    /// This is a plain arithmetic sum with no clamping; a negative entry
    /// passes through unmodified.
    pub fn total_r(&self) -> f64 {
        LayerSlot::ALL.iter().map(|slot| self.get(*slot)).sum()
    }
}
