//! # Calculation Settings
//!
//! Options that select between formula variants and control reporting.
//! Settings are carried in the job file; any field left out takes its
//! default, so `{}` is a valid settings object.
//!
//! ```rust
//! use seismic_core::settings::CalculationSettings;
//! use seismic_core::spectrum::SpectrumProfile;
//!
//! let settings: CalculationSettings =
//!     serde_json::from_str(r#"{ "spectrum_profile": "Soil" }"#).unwrap();
//! assert_eq!(settings.spectrum_profile, SpectrumProfile::Soil);
//! assert_eq!(settings.display_precision, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::period::PeriodStrategy;
use crate::spectrum::SpectrumProfile;

/// Code edition label printed on reports
pub const CODE_EDITION: &str = "IS 1893:2025";

/// Global calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// Building code label (e.g., "IS 1893:2025")
    pub code: String,

    /// Horizontal response spectrum rule set
    pub spectrum_profile: SpectrumProfile,

    /// Period estimation formula
    pub period_strategy: PeriodStrategy,

    /// Fill the combined √(V_H² + V_V²) column of storey tables
    pub combine_vertical: bool,

    /// Decimal places used when formatting values for display
    pub display_precision: usize,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        CalculationSettings {
            code: CODE_EDITION.to_string(),
            spectrum_profile: SpectrumProfile::default(),
            period_strategy: PeriodStrategy::default(),
            combine_vertical: true,
            display_precision: 3,
        }
    }
}
