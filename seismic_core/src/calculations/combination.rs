//! # Response Combination
//!
//! Two independent rules:
//!
//! - **Governing base shear**: V_design = max(V_RS, 0.8·V_static), the
//!   minimum base shear check when a response spectrum analysis is available
//! - **Horizontal/vertical interaction**: √(V_H² + V_V²) storey by storey
//!
//! Plus the static-vs-response-spectrum comparison table built on the first
//! rule.
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::calculations::combination::{combine_rss, governing_base_shear};
//!
//! assert_eq!(governing_base_shear(0.0, 100.0), 80.0);
//! let combined = combine_rss(&[3.0], &[4.0]).unwrap();
//! assert_eq!(combined, vec![5.0]);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::base_shear::{self, BaseShearInput, Direction};
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalculationSettings;

/// Minimum fraction of the static base shear a response spectrum result may
/// be scaled down to
pub const MIN_STATIC_FRACTION: f64 = 0.8;

/// V_design = max(V_RS, 0.8·V_static)
pub fn governing_base_shear(v_rs_kn: f64, v_static_kn: f64) -> f64 {
    v_rs_kn.max(MIN_STATIC_FRACTION * v_static_kn)
}

/// Elementwise √(h² + v²).
///
/// # Errors
///
/// `Validation` if the slices have different lengths.
pub fn combine_rss(horizontal: &[f64], vertical: &[f64]) -> CalcResult<Vec<f64>> {
    if horizontal.len() != vertical.len() {
        return Err(CalcError::validation(
            "combine_rss",
            format!(
                "{} horizontal values but {} vertical values",
                horizontal.len(),
                vertical.len()
            ),
        ));
    }
    Ok(horizontal
        .iter()
        .zip(vertical)
        .map(|(h, v)| h.hypot(*v))
        .collect())
}

/// Analysis method in the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    EquivalentStatic,
    ResponseSpectrum,
    DesignGoverning,
}

impl Method {
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::EquivalentStatic => "Equivalent Static",
            Method::ResponseSpectrum => "Response Spectrum",
            Method::DesignGoverning => "Design Governing",
        }
    }
}

/// One row of the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub method: Method,
    /// Sa/g for the analysis methods; absent for the governing row
    pub spectral_ratio: Option<f64>,
    pub base_shear_kn: f64,
}

/// Static vs response spectrum comparison for one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub direction: Direction,
    pub static_base_shear_kn: f64,
    pub rs_base_shear_kn: f64,
    pub design_base_shear_kn: f64,
    /// True when the 0.8·V_static floor controls
    pub static_floor_governs: bool,
    pub rows: Vec<ComparisonRow>,
}

/// Compare the equivalent static base shear with one derived from a
/// response spectrum ordinate `rs_spectral_ratio` (Sa/g read from a
/// response spectrum analysis).
pub fn compare_static_and_rs(
    input: &BaseShearInput,
    settings: &CalculationSettings,
    rs_spectral_ratio: f64,
    direction: Direction,
) -> CalcResult<ComparisonResult> {
    if !(rs_spectral_ratio >= 0.0) || !rs_spectral_ratio.is_finite() {
        return Err(CalcError::domain(
            "response_spectrum_sa",
            rs_spectral_ratio.to_string(),
            "Response spectrum Sa/g must be non-negative",
        ));
    }

    let static_result = base_shear::calculate(input, settings)?;
    let statics = static_result.direction(direction);

    let ah_rs = base_shear::design_horizontal_coefficient(
        static_result.zone_factor,
        static_result.importance_factor,
        rs_spectral_ratio,
        static_result.response_reduction,
    )?;
    let rs_base_shear_kn = ah_rs * static_result.seismic_weight_kn;
    let design_base_shear_kn = governing_base_shear(rs_base_shear_kn, statics.base_shear_kn);
    let static_floor_governs = design_base_shear_kn > rs_base_shear_kn;

    debug!(
        "static vs RS ({}): V_static = {:.2}, V_rs = {:.2}, V_design = {:.2}",
        direction, statics.base_shear_kn, rs_base_shear_kn, design_base_shear_kn
    );

    Ok(ComparisonResult {
        direction,
        static_base_shear_kn: statics.base_shear_kn,
        rs_base_shear_kn,
        design_base_shear_kn,
        static_floor_governs,
        rows: vec![
            ComparisonRow {
                method: Method::EquivalentStatic,
                spectral_ratio: Some(statics.spectral_ratio),
                base_shear_kn: statics.base_shear_kn,
            },
            ComparisonRow {
                method: Method::ResponseSpectrum,
                spectral_ratio: Some(rs_spectral_ratio),
                base_shear_kn: rs_base_shear_kn,
            },
            ComparisonRow {
                method: Method::DesignGoverning,
                spectral_ratio: None,
                base_shear_kn: design_base_shear_kn,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::base_shear::BuildingGeometry;
    use crate::reference::{SeismicZone, SiteClass, StructureType};

    fn test_input() -> BaseShearInput {
        BaseShearInput {
            label: "Comparison".to_string(),
            zone: SeismicZone::V,
            return_period_years: None,
            site_class: SiteClass::D,
            structure_type: StructureType::RcOmrf,
            importance_factor: 1.0,
            response_reduction: None,
            geometry: BuildingGeometry {
                height_m: 20.0,
                plan_x_m: 16.0,
                plan_y_m: 16.0,
                seismic_weight_kn: 8000.0,
            },
        }
    }

    #[test]
    fn test_static_floor_dominates() {
        assert_eq!(governing_base_shear(0.0, 100.0), 80.0);
        assert_eq!(governing_base_shear(95.0, 100.0), 95.0);
        assert!(governing_base_shear(10.0, 250.0) >= 0.8 * 250.0);
    }

    #[test]
    fn test_rss_combination() {
        let combined = combine_rss(&[300.0, 0.0], &[400.0, 2.0]).unwrap();
        assert!((combined[0] - 500.0).abs() < 1e-9);
        assert!((combined[1] - 2.0).abs() < 1e-12);
        assert!(combine_rss(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_comparison_with_low_rs_ordinate() {
        let settings = CalculationSettings::default();
        let result = compare_static_and_rs(&test_input(), &settings, 0.5, Direction::X).unwrap();

        // V_rs = 0.36 * 0.5 / 3 * 8000 = 480 kN
        assert!((result.rs_base_shear_kn - 480.0).abs() < 1e-9);
        assert!(result.design_base_shear_kn >= 0.8 * result.static_base_shear_kn);
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[2].method, Method::DesignGoverning);
        assert!(result.rows[2].spectral_ratio.is_none());
        assert_eq!(result.static_floor_governs, 0.8 * result.static_base_shear_kn > 480.0);
    }

    #[test]
    fn test_comparison_rejects_negative_ordinate() {
        let settings = CalculationSettings::default();
        let err = compare_static_and_rs(&test_input(), &settings, -0.1, Direction::X).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }
}
