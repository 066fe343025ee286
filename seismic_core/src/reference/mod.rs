//! # Reference Data
//!
//! Immutable code-defined reference data used by the calculations.
//!
//! - **Seismic zones** and the zone factor table by return period
//! - **Site classes** (and classification from shear wave velocity)
//! - **Structure types** with their response reduction factor and period
//!   coefficient
//!
//! Every table here is closed: lookups for pairs the code does not list fail
//! with [`CalcError::KeyNotFound`](crate::errors::CalcError::KeyNotFound)
//! rather than interpolating.
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::reference::{SeismicZone, SiteClass, StructureType};
//!
//! let zone = SeismicZone::IV;
//! assert_eq!(zone.zone_factor(), 0.24);
//! assert_eq!(zone.zone_factor_for(2475).unwrap(), 0.48);
//!
//! let site = SiteClass::from_shear_wave_velocity(400.0).unwrap();
//! assert_eq!(site, SiteClass::C);
//!
//! assert_eq!(StructureType::RcSmrf.response_reduction(), 5.0);
//! ```

pub mod site;
pub mod structure;
pub mod zone;

pub use site::SiteClass;
pub use structure::StructureType;
pub use zone::{SeismicZone, RETURN_PERIODS_YEARS};
