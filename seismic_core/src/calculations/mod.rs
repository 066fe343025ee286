//! # Seismic Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`base_shear`] - Period, spectral ratio and design base shear
//! - [`storey`] - Storey force distribution and cumulative storey shear
//! - [`combination`] - Governing shear and horizontal/vertical combination

pub mod base_shear;
pub mod combination;
pub mod storey;

// Re-export commonly used types
pub use base_shear::{BaseShearInput, BaseShearResult, BuildingGeometry, Direction};
pub use combination::{combine_rss, governing_base_shear, ComparisonResult};
pub use storey::{distribute, Action, Storey, StoreyForceTable};
