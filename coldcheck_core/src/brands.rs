//! # Brand Catalog
//!
//! Read-only lookup of known gear products and their rated R-values. The
//! catalog ships with a small built-in seed of common sleeping pads; if a
//! catalog file exists on disk it replaces the seed wholesale, so a shop
//! can maintain its own product list without rebuilding.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "thermarest_neoair_xtherm": {
//!     "type": "pad",
//!     "r": 5.7,
//!     "note": "4-season inflatable"
//!   }
//! }
//! ```
//!
//! Only entries with `type = "pad"` feed the pad insulation slot; other
//! types are carried for listing but never applied.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::file_io::read_json_lenient;

/// Default brand catalog filename
pub const BRANDS_FILE: &str = "brand_db.json";

/// What kind of gear a catalog entry rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GearKind {
    /// Sleeping pad; the only kind whose R-value is applied to inputs
    Pad,
    /// Anything else (carried in listings, never applied)
    #[serde(other)]
    Other,
}

impl GearKind {
    pub fn code(&self) -> &'static str {
        match self {
            GearKind::Pad => "pad",
            GearKind::Other => "other",
        }
    }
}

impl fmt::Display for GearKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One catalog entry: gear kind, rated R-value, and a free-form note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandInfo {
    #[serde(rename = "type")]
    pub kind: GearKind,
    #[serde(rename = "r")]
    pub r_value: f64,
    pub note: String,
}

/// Built-in pad entries used when no catalog file is present.
static SEED_ENTRIES: Lazy<BTreeMap<String, BrandInfo>> = Lazy::new(|| {
    let seed = [
        ("thermarest_neoair_xtherm", 5.7, "4-season inflatable"),
        ("thermarest_neoair_xlite", 4.2, "3-season ultralight inflatable"),
        ("nemo_tensor_allseason", 5.4, "4-season inflatable, quilted baffles"),
        ("seatosummit_ultralight", 3.1, "3-season inflatable"),
        ("thermarest_trailpro", 4.4, "self-inflating foam core"),
    ];
    seed.into_iter()
        .map(|(key, r_value, note)| {
            (
                key.to_string(),
                BrandInfo {
                    kind: GearKind::Pad,
                    r_value,
                    note: note.to_string(),
                },
            )
        })
        .collect()
});

/// Brand-to-rating lookup, keyed by brand identifier.
///
/// Construct with [`BrandCatalog::load`] (file override, seed fallback) or
/// [`BrandCatalog::seeded`] (seed only). The catalog is read-only once
/// built; callers treat it as an injected lookup service.
#[derive(Debug, Clone)]
pub struct BrandCatalog {
    entries: BTreeMap<String, BrandInfo>,
}

impl BrandCatalog {
    /// Catalog holding only the built-in seed entries
    pub fn seeded() -> BrandCatalog {
        BrandCatalog {
            entries: SEED_ENTRIES.clone(),
        }
    }

    /// Load the catalog from disk.
    ///
    /// A readable file replaces the seed wholesale. A missing, unreadable,
    /// or corrupt file falls back to the seed (corruption is logged at
    /// WARN, never surfaced as an error).
    pub fn load(path: &Path) -> BrandCatalog {
        match read_json_lenient::<BTreeMap<String, BrandInfo>>(path, "brand catalog") {
            Some(entries) => BrandCatalog { entries },
            None => BrandCatalog::seeded(),
        }
    }

    /// Look up an entry by brand identifier
    pub fn get(&self, key: &str) -> Option<&BrandInfo> {
        self.entries.get(key)
    }

    /// R-value of a brand's pad, if the key names a pad.
    ///
    /// Returns `None` for unknown keys and for entries of any other gear
    /// kind.
    pub fn pad_r(&self, key: &str) -> Option<f64> {
        self.entries
            .get(key)
            .filter(|info| info.kind == GearKind::Pad)
            .map(|info| info.r_value)
    }

    /// All entries in sorted key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BrandInfo)> {
        self.entries.iter().map(|(key, info)| (key.as_str(), info))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BrandCatalog {
    fn default() -> Self {
        BrandCatalog::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;

    fn temp_catalog_path(name: &str) -> PathBuf {
        temp_dir().join(format!("coldcheck_brands_{}.json", name))
    }

    #[test]
    fn test_seed_has_five_pads() {
        let catalog = BrandCatalog::seeded();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.entries().all(|(_, info)| info.kind == GearKind::Pad));
        assert_eq!(catalog.pad_r("thermarest_neoair_xtherm"), Some(5.7));
    }

    #[test]
    fn test_load_missing_file_uses_seed() {
        let path = temp_catalog_path("missing");
        let _ = fs::remove_file(&path);

        let catalog = BrandCatalog::load(&path);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_load_corrupt_file_uses_seed() {
        let path = temp_catalog_path("corrupt");
        fs::write(&path, "not json at all").unwrap();

        let catalog = BrandCatalog::load(&path);
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.pad_r("thermarest_neoair_xlite"), Some(4.2));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_catalog_file_replaces_seed_wholesale() {
        let path = temp_catalog_path("override");
        fs::write(
            &path,
            r#"{"shop_special": {"type": "pad", "r": 6.1, "note": "house brand"}}"#,
        )
        .unwrap();

        let catalog = BrandCatalog::load(&path);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.pad_r("shop_special"), Some(6.1));
        // Seed entries are gone, not merged
        assert_eq!(catalog.get("thermarest_neoair_xtherm"), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_pad_r_only_applies_to_pads() {
        let path = temp_catalog_path("kinds");
        fs::write(
            &path,
            r#"{
                "good_pad": {"type": "pad", "r": 4.8, "note": "shop measured"},
                "warm_quilt": {"type": "quilt", "r": 3.0, "note": "not a pad"}
            }"#,
        )
        .unwrap();

        let catalog = BrandCatalog::load(&path);
        assert_eq!(catalog.pad_r("good_pad"), Some(4.8));
        // Unknown gear kinds load fine but never apply
        assert_eq!(catalog.get("warm_quilt").unwrap().kind, GearKind::Other);
        assert_eq!(catalog.pad_r("warm_quilt"), None);
        assert_eq!(catalog.pad_r("no_such_brand"), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_entries_sorted_by_key() {
        let catalog = BrandCatalog::seeded();
        let keys: Vec<&str> = catalog.entries().map(|(key, _)| key).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
