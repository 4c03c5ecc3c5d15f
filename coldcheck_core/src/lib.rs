//! # coldcheck_core - Thermal Balance Calculation Engine
//!
//! `coldcheck_core` is the computational heart of ColdCheck, answering one
//! question for a planned cold-weather trip: will the body generate more
//! heat than the gear lets escape? All inputs and outputs are
//! JSON-serializable, making the engine easy to drive from a CLI, a form,
//! or a service.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Lenient at the Edges**: Unknown tags and unreadable files degrade
//!   to defaults instead of failing
//!
//! ## Quick Start
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
//! assert!(result.is_surplus()); // bag and pad carry a mild night
//! ```
//!
//! ## Modules
//!
//! - [`insulation`] - Gear slots and R-value aggregation
//! - [`weather`] - Wind/weather derating of insulation
//! - [`biometrics`] - Body profile defaults (surface area, metabolic rate)
//! - [`trip`] - Input assembly, heat-loss math, and the balance verdict
//! - [`setups`] - Named, persisted input snapshots
//! - [`brands`] - Seeded gear catalog with on-disk override
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod biometrics;
pub mod brands;
pub mod errors;
pub mod file_io;
pub mod insulation;
pub mod setups;
pub mod trip;
pub mod weather;

// Re-export commonly used types at crate root for convenience
pub use biometrics::{AgeGroup, BodyProfile, HeightClass, Sex};
pub use errors::{BalanceError, BalanceResult};
pub use insulation::{InsulationSet, LayerSlot};
pub use trip::{calculate, TripInput, TripResult};
pub use weather::{Exposure, WeatherCondition};
