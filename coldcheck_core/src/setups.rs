//! # Saved Setups
//!
//! Named snapshots of calculator inputs, persisted as a single JSON file
//! mapping setup name to a flat field mapping. Reads are lenient (missing
//! or corrupt file means an empty store); writes are atomic and locked.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "overnight_jan": {
//!     "jacket": 0.5,
//!     "bag": 4.0,
//!     "pad": 5.7,
//!     "condition": "snow",
//!     "wind": 10.0,
//!     "duration": 12.0,
//!     "profile": "adult",
//!     "saved_at": "2026-01-17T03:21:09Z"
//!   }
//! }
//! ```
//!
//! Fields a setup does not carry are left untouched when it is applied, so
//! hand-trimmed partial setups merge cleanly over defaults. A setup with
//! unrecognized field names fails the parse, which the leniency policy
//! turns into an empty store.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::biometrics::{AgeGroup, HeightClass, Sex};
use crate::errors::BalanceResult;
use crate::file_io::{atomic_write_json, read_json_lenient, ExclusiveLock};
use crate::insulation::LayerSlot;
use crate::trip::TripInput;
use crate::weather::WeatherCondition;

/// Default setup store filename
pub const SETUPS_FILE: &str = "saved_setups.json";

/// One persisted snapshot of calculator inputs.
///
/// Every field is optional; a present field overrides the corresponding
/// input when the setup is applied, an absent field leaves it alone.
/// Unknown field names are rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SavedSetup {
    // Insulation slots (R-values)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jacket: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extremities: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter: Option<f64>,

    // Exposure and trip parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<WeatherCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tout: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbody: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    // Biometric profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<AgeGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<HeightClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// When this setup was saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedSetup {
    /// Snapshot all fields of a trip input, stamped with the current time.
    pub fn from_input(input: &TripInput) -> Self {
        SavedSetup {
            jacket: Some(input.insulation.get(LayerSlot::Jacket)),
            bag: Some(input.insulation.get(LayerSlot::Bag)),
            pad: Some(input.insulation.get(LayerSlot::Pad)),
            layers: Some(input.insulation.get(LayerSlot::Layers)),
            extremities: Some(input.insulation.get(LayerSlot::Extremities)),
            shelter: Some(input.insulation.get(LayerSlot::Shelter)),
            condition: Some(input.exposure.condition),
            wind: Some(input.exposure.wind_mph),
            tout: Some(input.ambient_temp_f),
            tbody: Some(input.body_temp_f),
            duration: Some(input.duration_hr),
            profile: Some(input.profile.age_group),
            height: Some(input.profile.height),
            sex: Some(input.profile.sex),
            weight: input.profile.weight_lb,
            saved_at: Some(Utc::now()),
        }
    }

    /// Merge this setup onto a trip input, field by field.
    ///
    /// Only present fields override; everything else keeps its current
    /// value.
    pub fn apply_to(&self, input: &mut TripInput) {
        let slot_values = [
            (self.jacket, LayerSlot::Jacket),
            (self.bag, LayerSlot::Bag),
            (self.pad, LayerSlot::Pad),
            (self.layers, LayerSlot::Layers),
            (self.extremities, LayerSlot::Extremities),
            (self.shelter, LayerSlot::Shelter),
        ];
        for (value, slot) in slot_values {
            if let Some(r_value) = value {
                input.insulation.set_r(slot, r_value);
            }
        }

        if let Some(condition) = self.condition {
            input.exposure.condition = condition;
        }
        if let Some(wind) = self.wind {
            input.exposure.wind_mph = wind;
        }
        if let Some(tout) = self.tout {
            input.ambient_temp_f = tout;
        }
        if let Some(tbody) = self.tbody {
            input.body_temp_f = tbody;
        }
        if let Some(duration) = self.duration {
            input.duration_hr = duration;
        }
        if let Some(profile) = self.profile {
            input.profile.age_group = profile;
        }
        if let Some(height) = self.height {
            input.profile.height = height;
        }
        if let Some(sex) = self.sex {
            input.profile.sex = sex;
        }
        if let Some(weight) = self.weight {
            input.profile.weight_lb = Some(weight);
        }
    }
}

/// All saved setups, keyed by name.
///
/// Backed by a `BTreeMap` so listings come out sorted. Load never fails
/// (missing or unreadable file means an empty store); save propagates real
/// write errors.
#[derive(Debug, Clone, Default)]
pub struct SetupStore {
    /// Setups by name
    pub setups: BTreeMap<String, SavedSetup>,
}

impl SetupStore {
    /// Load the store from disk.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// also an empty store, logged at WARN; no error is surfaced.
    pub fn load(path: &Path) -> SetupStore {
        let setups = read_json_lenient::<BTreeMap<String, SavedSetup>>(path, "setup store")
            .unwrap_or_default();
        SetupStore { setups }
    }

    /// Write the store to disk atomically, holding the write lock.
    pub fn save(&self, path: &Path) -> BalanceResult<()> {
        let _lock = ExclusiveLock::acquire(path)?;
        atomic_write_json(&self.setups, path)
    }

    /// Insert or replace a setup (last write wins), returning the old one
    pub fn insert(&mut self, name: impl Into<String>, setup: SavedSetup) -> Option<SavedSetup> {
        self.setups.insert(name.into(), setup)
    }

    /// Look up a setup by name
    pub fn get(&self, name: &str) -> Option<&SavedSetup> {
        self.setups.get(name)
    }

    /// Remove a setup by name
    pub fn remove(&mut self, name: &str) -> Option<SavedSetup> {
        self.setups.remove(name)
    }

    /// All setup names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.setups.keys().map(|name| name.as_str())
    }

    /// Number of setups
    pub fn len(&self) -> usize {
        self.setups.len()
    }

    /// Whether the store holds no setups
    pub fn is_empty(&self) -> bool {
        self.setups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insulation::InsulationSet;
    use crate::trip::calculate;
    use crate::weather::Exposure;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;

    fn temp_store_path(name: &str) -> PathBuf {
        temp_dir().join(format!("coldcheck_setups_{}.json", name))
    }

    fn sample_input() -> TripInput {
        TripInput {
            insulation: InsulationSet::new()
                .with_r(LayerSlot::Jacket, 0.5)
                .with_r(LayerSlot::Bag, 4.0)
                .with_r(LayerSlot::Pad, 3.5),
            exposure: Exposure::new(10.0, WeatherCondition::Snow),
            duration_hr: 8.0,
            ..TripInput::default()
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = temp_store_path("missing");
        let _ = fs::remove_file(&path);

        let store = SetupStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let path = temp_store_path("corrupt");
        fs::write(&path, "{ this is not json").unwrap();

        let store = SetupStore::load(&path);
        assert!(store.is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_field_treated_as_corrupt() {
        let path = temp_store_path("unknown_field");
        fs::write(&path, r#"{"trip": {"jacket": 1.0, "warp_core": 3.0}}"#).unwrap();

        let store = SetupStore::load(&path);
        assert!(store.is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_condition_tag_still_loads() {
        let path = temp_store_path("unknown_condition");
        fs::write(&path, r#"{"trip": {"condition": "blizzard"}}"#).unwrap();

        let store = SetupStore::load(&path);
        let setup = store.get("trip").unwrap();
        assert_eq!(setup.condition, Some(WeatherCondition::Unknown));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_store_path("roundtrip");

        let mut store = SetupStore::default();
        store.insert("winter", SavedSetup::from_input(&sample_input()));
        store.insert("alpine", SavedSetup::from_input(&TripInput::default()));
        store.save(&path).unwrap();

        let loaded = SetupStore::load(&path);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("winter").unwrap().pad, Some(3.5));
        assert_eq!(loaded.get("winter").unwrap().condition, Some(WeatherCondition::Snow));

        // BTreeMap keeps listings sorted
        let names: Vec<&str> = loaded.names().collect();
        assert_eq!(names, vec!["alpine", "winter"]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_last_write_wins() {
        let path = temp_store_path("last_write");

        let mut store = SetupStore::default();
        let mut first = sample_input();
        first.insulation.set_r(LayerSlot::Pad, 3.5);
        store.insert("trip", SavedSetup::from_input(&first));

        let mut second = sample_input();
        second.insulation.set_r(LayerSlot::Pad, 5.7);
        let replaced = store.insert("trip", SavedSetup::from_input(&second));

        assert!(replaced.is_some());
        assert_eq!(store.len(), 1);

        store.save(&path).unwrap();
        let loaded = SetupStore::load(&path);
        assert_eq!(loaded.get("trip").unwrap().pad, Some(5.7));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_store_path("atomic");
        let tmp_path = path.with_extension("json.tmp");

        let mut store = SetupStore::default();
        store.insert("trip", SavedSetup::from_input(&sample_input()));
        store.save(&path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_from_input_snapshot_and_apply_roundtrip() {
        let input = sample_input();
        let setup = SavedSetup::from_input(&input);
        assert!(setup.saved_at.is_some());

        let mut restored = TripInput::default();
        setup.apply_to(&mut restored);

        let original = calculate(&input).unwrap();
        let roundtrip = calculate(&restored).unwrap();
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_apply_overrides_only_present_fields() {
        let setup = SavedSetup {
            pad: Some(5.7),
            condition: Some(WeatherCondition::Snow),
            ..SavedSetup::default()
        };

        let mut input = TripInput {
            insulation: InsulationSet::new().with_r(LayerSlot::Jacket, 0.5),
            exposure: Exposure::new(25.0, WeatherCondition::Gale),
            ..TripInput::default()
        };
        setup.apply_to(&mut input);

        assert_eq!(input.insulation.get(LayerSlot::Pad), 5.7);
        assert_eq!(input.insulation.get(LayerSlot::Jacket), 0.5); // untouched
        assert_eq!(input.exposure.condition, WeatherCondition::Snow);
        assert_eq!(input.exposure.wind_mph, 25.0); // untouched
        assert_eq!(input.profile.weight_lb, None); // untouched
    }

    #[test]
    fn test_flat_file_shape() {
        let path = temp_store_path("wire_shape");
        fs::write(
            &path,
            r#"{"overnight": {"pad": 5.7, "condition": "wet_cold", "weight": 180.0}}"#,
        )
        .unwrap();

        let store = SetupStore::load(&path);
        let setup = store.get("overnight").unwrap();
        assert_eq!(setup.pad, Some(5.7));
        assert_eq!(setup.condition, Some(WeatherCondition::WetCold));
        assert_eq!(setup.weight, Some(180.0));
        assert_eq!(setup.jacket, None);

        let _ = fs::remove_file(&path);
    }
}
