//! # seismic_core - Equivalent Static Seismic Calculation Engine
//!
//! `seismic_core` evaluates the IS 1893:2025 equivalent static force method:
//! fundamental period, design spectrum, horizontal and vertical base shear,
//! storey force distribution and response combination. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Closed tables**: Zones, site classes and structure types are enums;
//!   table lookups never interpolate
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use seismic_core::calculations::{BaseShearInput, BuildingGeometry, Direction, Storey};
//! use seismic_core::pipeline::SeismicPipeline;
//! use seismic_core::reference::{SeismicZone, SiteClass, StructureType};
//! use seismic_core::settings::CalculationSettings;
//!
//! let input = BaseShearInput {
//!     label: "Block A".to_string(),
//!     zone: SeismicZone::IV,
//!     return_period_years: None,
//!     site_class: SiteClass::AB,
//!     structure_type: StructureType::RcSmrf,
//!     importance_factor: 1.0,
//!     response_reduction: None,
//!     geometry: BuildingGeometry { height_m: 15.0, plan_x_m: 10.0, plan_y_m: 10.0, seismic_weight_kn: 10_000.0 },
//! };
//!
//! let mut pipeline = SeismicPipeline::new(CalculationSettings::default());
//! let vx = pipeline.compute_base_shear(&input).unwrap().x.base_shear_kn;
//!
//! let storeys = Storey::from_arrays(&[2000.0; 5], &[3.0, 6.0, 9.0, 12.0, 15.0]).unwrap();
//! let table = pipeline.distribute(&storeys, Direction::X).unwrap();
//! assert!((table.base_storey_shear_kn() - vx).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`reference`] - Seismic zones, zone factor table, site classes, structure types
//! - [`spectrum`] - Horizontal and vertical design spectrum
//! - [`period`] - Fundamental period estimators
//! - [`calculations`] - Base shear, storey distribution, response combination
//! - [`pipeline`] - Two-phase compute-then-distribute workflow
//! - [`settings`] - Formula variant selection and display options
//! - [`job`] - Job container (settings, inputs, storeys)
//! - [`report`] / [`pdf`] - Tabular and document export
//! - [`file_io`] - Job loading and atomic export writes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod job;
pub mod pdf;
pub mod period;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod settings;
pub mod spectrum;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_job, save_job, write_atomic};
pub use job::{JobOutput, SeismicJob};
pub use pipeline::SeismicPipeline;
pub use settings::CalculationSettings;
