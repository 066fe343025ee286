//! # Design Base Shear
//!
//! Equivalent static base shear per IS 1893:2025.
//!
//! ## Formulas
//!
//! - Horizontal: A_h = Z·I·(Sa/g)/R, V_B = A_h·W (each plan direction)
//! - Vertical:   A_v = Z·I·(A_v(T)), V_v = A_v·W (no division by R)
//!
//! Z is the base zone factor unless a return period is given, in which case
//! it comes from the zone factor table. R defaults to the structure type's
//! value.
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::calculations::base_shear::{calculate, BaseShearInput, BuildingGeometry};
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
//!     geometry: BuildingGeometry {
//!         height_m: 15.0,
//!         plan_x_m: 10.0,
//!         plan_y_m: 10.0,
//!         seismic_weight_kn: 10_000.0,
//!     },
//! };
//!
//! let result = calculate(&input, &CalculationSettings::default()).unwrap();
//! println!("V_x = {:.1} kN", result.x.base_shear_kn);
//! ```

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::period::{estimate_period, PeriodStrategy};
use crate::reference::{SeismicZone, SiteClass, StructureType};
use crate::settings::CalculationSettings;
use crate::spectrum::{horizontal_ratio, vertical_ratio, SpectrumProfile};

/// Plan direction of horizontal shaking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    X,
    Y,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::X, Direction::Y];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::X => f.write_str("X"),
            Direction::Y => f.write_str("Y"),
        }
    }
}

/// Overall building dimensions and weight.
///
/// ## JSON Example
///
/// ```json
/// { "height_m": 15.0, "plan_x_m": 20.0, "plan_y_m": 12.0, "seismic_weight_kn": 10000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingGeometry {
    /// Height above foundation (m)
    pub height_m: f64,

    /// Plan dimension along X (m)
    pub plan_x_m: f64,

    /// Plan dimension along Y (m)
    pub plan_y_m: f64,

    /// Total seismic weight W (kN)
    pub seismic_weight_kn: f64,
}

impl BuildingGeometry {
    /// Plan dimension measured along the direction of shaking
    pub fn plan_dimension_m(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.plan_x_m,
            Direction::Y => self.plan_y_m,
        }
    }
}

fn default_importance_factor() -> f64 {
    1.0
}

/// Input parameters for the base shear calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Block A",
///   "zone": "IV",
///   "return_period_years": 2475,
///   "site_class": "C",
///   "structure_type": "RC-SMRF",
///   "importance_factor": 1.2,
///   "geometry": { "height_m": 15.0, "plan_x_m": 20.0, "plan_y_m": 12.0, "seismic_weight_kn": 10000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseShearInput {
    /// User label (e.g., "Block A")
    #[serde(default)]
    pub label: String,

    /// Seismic zone
    pub zone: SeismicZone,

    /// Return period for the zone factor table; base zone factor when absent
    #[serde(default)]
    pub return_period_years: Option<u32>,

    /// Site class
    pub site_class: SiteClass,

    /// Lateral system (supplies R and the period coefficient)
    pub structure_type: StructureType,

    /// Importance factor I
    #[serde(default = "default_importance_factor")]
    pub importance_factor: f64,

    /// Response reduction factor override; structure type's R when absent
    #[serde(default)]
    pub response_reduction: Option<f64>,

    /// Building geometry and weight
    pub geometry: BuildingGeometry,
}

impl BaseShearInput {
    /// Validate input parameters.
    ///
    /// Plan dimensions are only read by the plan-dimension period formula,
    /// so they are only checked under [`PeriodStrategy::PlanDimension`].
    pub fn validate(&self, period_strategy: PeriodStrategy) -> CalcResult<()> {
        let g = &self.geometry;
        if !(g.height_m > 0.0) || !g.height_m.is_finite() {
            return Err(CalcError::domain(
                "height_m",
                g.height_m.to_string(),
                "Building height must be positive and finite",
            ));
        }
        if period_strategy == PeriodStrategy::PlanDimension {
            for direction in Direction::ALL {
                let d = g.plan_dimension_m(direction);
                if !(d > 0.0) || !d.is_finite() {
                    return Err(CalcError::domain(
                        format!("plan_{}_m", direction.to_string().to_lowercase()),
                        d.to_string(),
                        "Plan dimension must be positive and finite",
                    ));
                }
            }
        }
        if !(g.seismic_weight_kn >= 0.0) || !g.seismic_weight_kn.is_finite() {
            return Err(CalcError::domain(
                "seismic_weight_kn",
                g.seismic_weight_kn.to_string(),
                "Seismic weight must be non-negative and finite",
            ));
        }
        if !(self.importance_factor > 0.0) || !self.importance_factor.is_finite() {
            return Err(CalcError::domain(
                "importance_factor",
                self.importance_factor.to_string(),
                "Importance factor must be positive and finite",
            ));
        }
        let r = self.response_reduction_factor();
        if !(r > 0.0) || !r.is_finite() {
            return Err(CalcError::domain(
                "response_reduction",
                r.to_string(),
                "Response reduction factor must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Zone factor Z (table lookup when a return period is set)
    pub fn zone_factor(&self) -> CalcResult<f64> {
        match self.return_period_years {
            Some(years) => self.zone.zone_factor_for(years),
            None => Ok(self.zone.zone_factor()),
        }
    }

    /// Response reduction factor R
    pub fn response_reduction_factor(&self) -> f64 {
        self.response_reduction
            .unwrap_or_else(|| self.structure_type.response_reduction())
    }
}

/// Horizontal result for one plan direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalShear {
    pub direction: Direction,
    /// Plan dimension used by the period formula (m)
    pub plan_dimension_m: f64,
    /// Fundamental period T (s)
    pub period_s: f64,
    /// Spectral acceleration ratio Sa/g
    pub spectral_ratio: f64,
    /// Design horizontal acceleration coefficient A_h
    pub design_coefficient: f64,
    /// Design base shear V_B (kN)
    pub base_shear_kn: f64,
}

/// Vertical result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalShear {
    /// Period used for the vertical spectrum (s)
    pub period_s: f64,
    /// Vertical amplification δᵥ·γᵥ
    pub vertical_ratio: f64,
    /// Design vertical acceleration coefficient A_v
    pub design_coefficient: f64,
    /// Vertical base force V_v (kN)
    pub base_shear_kn: f64,
}

/// Results from the base shear calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "zone_factor": 0.24,
///   "importance_factor": 1.0,
///   "response_reduction": 5.0,
///   "seismic_weight_kn": 10000.0,
///   "x": { "direction": "X", "period_s": 0.427, "spectral_ratio": 2.342, "design_coefficient": 0.1124, "base_shear_kn": 1124.3 },
///   "...": "..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseShearResult {
    pub zone_factor: f64,
    pub importance_factor: f64,
    pub response_reduction: f64,
    pub seismic_weight_kn: f64,
    pub spectrum_profile: SpectrumProfile,
    pub period_strategy: PeriodStrategy,
    pub x: DirectionalShear,
    pub y: DirectionalShear,
    pub vertical: VerticalShear,
}

impl BaseShearResult {
    /// Horizontal result for a direction
    pub fn direction(&self, direction: Direction) -> &DirectionalShear {
        match direction {
            Direction::X => &self.x,
            Direction::Y => &self.y,
        }
    }

    /// Direction with the larger horizontal base shear
    pub fn governing_horizontal(&self) -> &DirectionalShear {
        if self.y.base_shear_kn > self.x.base_shear_kn {
            &self.y
        } else {
            &self.x
        }
    }
}

/// A_h = Z·I·(Sa/g)/R
pub fn design_horizontal_coefficient(
    zone_factor: f64,
    importance_factor: f64,
    spectral_ratio: f64,
    response_reduction: f64,
) -> CalcResult<f64> {
    if !(response_reduction > 0.0) {
        return Err(CalcError::domain(
            "response_reduction",
            response_reduction.to_string(),
            "Response reduction factor must be positive",
        ));
    }
    Ok(zone_factor * importance_factor * spectral_ratio / response_reduction)
}

/// A_v = Z·I·A_v(T)
pub fn design_vertical_coefficient(zone_factor: f64, importance_factor: f64, vertical_ratio: f64) -> f64 {
    zone_factor * importance_factor * vertical_ratio
}

fn directional_shear(
    input: &BaseShearInput,
    settings: &CalculationSettings,
    zone_factor: f64,
    direction: Direction,
) -> CalcResult<DirectionalShear> {
    let g = &input.geometry;
    let plan_dimension_m = g.plan_dimension_m(direction);
    let period_s = estimate_period(
        settings.period_strategy,
        g.height_m,
        plan_dimension_m,
        input.structure_type.period_coefficient(),
    )?;
    let spectral_ratio = horizontal_ratio(period_s, input.site_class, settings.spectrum_profile)?;
    let design_coefficient = design_horizontal_coefficient(
        zone_factor,
        input.importance_factor,
        spectral_ratio,
        input.response_reduction_factor(),
    )?;
    let base_shear_kn = design_coefficient * g.seismic_weight_kn;

    debug!(
        "direction {}: T = {:.4} s, Sa/g = {:.4}, Ah = {:.5}, V = {:.2} kN",
        direction, period_s, spectral_ratio, design_coefficient, base_shear_kn
    );

    Ok(DirectionalShear {
        direction,
        plan_dimension_m,
        period_s,
        spectral_ratio,
        design_coefficient,
        base_shear_kn,
    })
}

/// Calculate horizontal and vertical design base shear.
///
/// # Arguments
///
/// * `input` - Zone, site, structure and geometry
/// * `settings` - Spectrum profile and period strategy
///
/// # Returns
///
/// * `Ok(BaseShearResult)` - Calculation results
/// * `Err(CalcError)` - `Domain` for out-of-range numbers, `KeyNotFound`
///   for an unlisted return period
pub fn calculate(input: &BaseShearInput, settings: &CalculationSettings) -> CalcResult<BaseShearResult> {
    input.validate(settings.period_strategy)?;

    let zone_factor = input.zone_factor()?;
    let x = directional_shear(input, settings, zone_factor, Direction::X)?;
    let y = directional_shear(input, settings, zone_factor, Direction::Y)?;

    // Vertical spectrum is read at the shorter of the two horizontal periods
    let vertical_period_s = x.period_s.min(y.period_s);
    let v_ratio = vertical_ratio(vertical_period_s, input.site_class)?;
    let av = design_vertical_coefficient(zone_factor, input.importance_factor, v_ratio);
    let vertical = VerticalShear {
        period_s: vertical_period_s,
        vertical_ratio: v_ratio,
        design_coefficient: av,
        base_shear_kn: av * input.geometry.seismic_weight_kn,
    };
    debug!(
        "vertical: T = {:.4} s, Av = {:.5}, V = {:.2} kN",
        vertical.period_s, vertical.design_coefficient, vertical.base_shear_kn
    );

    Ok(BaseShearResult {
        zone_factor,
        importance_factor: input.importance_factor,
        response_reduction: input.response_reduction_factor(),
        seismic_weight_kn: input.geometry.seismic_weight_kn,
        spectrum_profile: settings.spectrum_profile,
        period_strategy: settings.period_strategy,
        x,
        y,
        vertical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> BaseShearInput {
        BaseShearInput {
            label: "Test Block".to_string(),
            zone: SeismicZone::IV,
            return_period_years: None,
            site_class: SiteClass::AB,
            structure_type: StructureType::RcSmrf,
            importance_factor: 1.0,
            response_reduction: None,
            geometry: BuildingGeometry {
                height_m: 15.0,
                plan_x_m: 10.0,
                plan_y_m: 10.0,
                seismic_weight_kn: 10_000.0,
            },
        }
    }

    #[test]
    fn test_zone_iv_reference_building() {
        let result = calculate(&test_input(), &CalculationSettings::default()).unwrap();

        // T = 0.09 * 15 / sqrt(10) = 0.4269 s
        assert!((result.x.period_s - 0.4269).abs() < 1e-3);
        // Sa/g = 1 / T = 2.342
        assert!((result.x.spectral_ratio - 2.342).abs() < 1e-2);
        // Ah = 0.24 * 2.342 / 5 = 0.1124
        assert!((result.x.design_coefficient - 0.1124).abs() < 1e-3);
        // V = 1124 kN (within 1%)
        assert!((result.x.base_shear_kn - 1124.0).abs() / 1124.0 < 0.01);
        assert_eq!(result.x, DirectionalShear { direction: Direction::X, ..result.y });
    }

    #[test]
    fn test_directions_differ_with_plan() {
        let mut input = test_input();
        input.geometry.plan_y_m = 40.0;
        let result = calculate(&input, &CalculationSettings::default()).unwrap();
        // Longer plan -> shorter period -> plateau in Y
        assert!(result.y.period_s < result.x.period_s);
        assert_eq!(result.y.spectral_ratio, 2.5);
        assert_eq!(result.governing_horizontal().direction, Direction::Y);
        assert_eq!(result.vertical.period_s, result.y.period_s);
    }

    #[test]
    fn test_vertical_is_independent_of_r() {
        let settings = CalculationSettings::default();
        let base = calculate(&test_input(), &settings).unwrap();
        let mut input = test_input();
        input.response_reduction = Some(2.5);
        let reduced = calculate(&input, &settings).unwrap();

        assert_eq!(base.vertical, reduced.vertical);
        assert!((reduced.x.base_shear_kn - 2.0 * base.x.base_shear_kn).abs() < 1e-9);
    }

    #[test]
    fn test_return_period_zone_factor() {
        let mut input = test_input();
        input.return_period_years = Some(2475);
        let result = calculate(&input, &CalculationSettings::default()).unwrap();
        assert_eq!(result.zone_factor, 0.48);

        input.return_period_years = Some(100);
        let err = calculate(&input, &CalculationSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "KEY_NOT_FOUND");
    }

    #[test]
    fn test_structure_coefficient_strategy() {
        let settings = CalculationSettings {
            period_strategy: PeriodStrategy::StructureCoefficient,
            ..CalculationSettings::default()
        };
        let result = calculate(&test_input(), &settings).unwrap();
        // 0.075 * 15^0.75 = 0.5715 s
        assert!((result.x.period_s - 0.075 * 15f64.powf(0.75)).abs() < 1e-12);
        assert_eq!(result.x.period_s, result.y.period_s);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = test_input();
        input.response_reduction = Some(0.0);
        assert_eq!(
            calculate(&input, &CalculationSettings::default()).unwrap_err().error_code(),
            "DOMAIN_ERROR"
        );

        let mut input = test_input();
        input.geometry.seismic_weight_kn = -1.0;
        assert!(calculate(&input, &CalculationSettings::default()).is_err());

        let mut input = test_input();
        input.geometry.plan_x_m = 0.0;
        assert!(calculate(&input, &CalculationSettings::default()).is_err());

        assert!(design_horizontal_coefficient(0.24, 1.0, 2.5, 0.0).is_err());
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let settings = CalculationSettings::default();

        let mut input = test_input();
        input.geometry.seismic_weight_kn = f64::INFINITY;
        let err = calculate(&input, &settings).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");

        let mut input = test_input();
        input.importance_factor = f64::INFINITY;
        assert!(calculate(&input, &settings).is_err());

        let mut input = test_input();
        input.response_reduction = Some(f64::INFINITY);
        assert!(calculate(&input, &settings).is_err());

        let mut input = test_input();
        input.geometry.height_m = f64::NAN;
        assert!(calculate(&input, &settings).is_err());

        let mut input = test_input();
        input.geometry.plan_y_m = f64::INFINITY;
        assert!(calculate(&input, &settings).is_err());
    }

    #[test]
    fn test_plan_dimensions_unused_by_structure_coefficient() {
        let mut input = test_input();
        input.geometry.plan_x_m = 0.0;
        input.geometry.plan_y_m = 0.0;

        let settings = CalculationSettings {
            period_strategy: PeriodStrategy::StructureCoefficient,
            ..CalculationSettings::default()
        };
        let result = calculate(&input, &settings).unwrap();
        assert!((result.x.period_s - 0.075 * 15f64.powf(0.75)).abs() < 1e-12);

        match calculate(&input, &CalculationSettings::default()).unwrap_err() {
            CalcError::Domain { field, .. } => assert_eq!(field, "plan_x_m"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_recompute_is_bit_identical() {
        let settings = CalculationSettings::default();
        let a = calculate(&test_input(), &settings).unwrap();
        let b = calculate(&test_input(), &settings).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.x.base_shear_kn.to_bits(), b.x.base_shear_kn.to_bits());
    }

    #[test]
    fn test_importance_factor_default() {
        let json = r#"{
            "zone": "III",
            "site_class": "Soft",
            "structure_type": "Shear-Wall",
            "geometry": { "height_m": 12.0, "plan_x_m": 9.0, "plan_y_m": 16.0, "seismic_weight_kn": 5000.0 }
        }"#;
        let input: BaseShearInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.importance_factor, 1.0);
        assert_eq!(input.site_class, SiteClass::D);
        assert_eq!(input.response_reduction_factor(), 4.0);
    }
}
