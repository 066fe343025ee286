//! # Fundamental Period Estimation
//!
//! Two empirical estimators, selected explicitly through [`PeriodStrategy`]:
//!
//! - `StructureCoefficient`: T = c·H^0.75, c from the structure type
//! - `PlanDimension`: T = 0.09·H/√d, d the plan dimension along the
//!   direction of shaking
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::period::{estimate_period, PeriodStrategy};
//!
//! let t = estimate_period(PeriodStrategy::PlanDimension, 15.0, 10.0, 0.075).unwrap();
//! assert!((t - 0.4269).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Coefficient of the plan-dimension period formula
pub const PLAN_DIMENSION_COEFFICIENT: f64 = 0.09;

/// Exponent on height in the structure-coefficient formula
pub const HEIGHT_EXPONENT: f64 = 0.75;

/// Which empirical period formula to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeriodStrategy {
    /// T = 0.09·H/√d (code approximate period; differs per plan direction)
    #[default]
    PlanDimension,
    /// T = c·H^0.75 (structure-type coefficient; same in both directions)
    StructureCoefficient,
}

impl PeriodStrategy {
    /// Formula in display form
    pub fn equation(&self) -> &'static str {
        match self {
            PeriodStrategy::PlanDimension => "T = 0.09 H / sqrt(d)",
            PeriodStrategy::StructureCoefficient => "T = c H^0.75",
        }
    }
}

fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(CalcError::domain(field, value.to_string(), reason));
    }
    Ok(())
}

/// T = c·H^0.75
pub fn structure_coefficient_period(height_m: f64, coefficient: f64) -> CalcResult<f64> {
    require_positive("height_m", height_m, "Building height must be positive")?;
    require_positive("period_coefficient", coefficient, "Period coefficient must be positive")?;
    Ok(coefficient * height_m.powf(HEIGHT_EXPONENT))
}

/// T = 0.09·H/√d
pub fn plan_dimension_period(height_m: f64, plan_dimension_m: f64) -> CalcResult<f64> {
    require_positive("height_m", height_m, "Building height must be positive")?;
    require_positive(
        "plan_dimension_m",
        plan_dimension_m,
        "Plan dimension must be positive",
    )?;
    Ok(PLAN_DIMENSION_COEFFICIENT * height_m / plan_dimension_m.sqrt())
}

/// Estimate the fundamental period with the given strategy.
///
/// `plan_dimension_m` is only read by `PlanDimension` and `coefficient`
/// only by `StructureCoefficient`.
pub fn estimate_period(
    strategy: PeriodStrategy,
    height_m: f64,
    plan_dimension_m: f64,
    coefficient: f64,
) -> CalcResult<f64> {
    match strategy {
        PeriodStrategy::PlanDimension => plan_dimension_period(height_m, plan_dimension_m),
        PeriodStrategy::StructureCoefficient => structure_coefficient_period(height_m, coefficient),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_dimension_period() {
        // 0.09 * 15 / sqrt(10) = 0.42691
        let t = plan_dimension_period(15.0, 10.0).unwrap();
        assert!((t - 0.42691).abs() < 1e-4);
    }

    #[test]
    fn test_structure_coefficient_period() {
        // 0.075 * 16^0.75 = 0.075 * 8
        let t = structure_coefficient_period(16.0, 0.075).unwrap();
        assert!((t - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_dispatch() {
        let by_plan = estimate_period(PeriodStrategy::PlanDimension, 16.0, 25.0, 0.075).unwrap();
        let by_coeff = estimate_period(PeriodStrategy::StructureCoefficient, 16.0, 25.0, 0.075).unwrap();
        assert!((by_plan - 0.288).abs() < 1e-12);
        assert!((by_coeff - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            plan_dimension_period(15.0, 0.0).unwrap_err().error_code(),
            "DOMAIN_ERROR"
        );
        assert!(plan_dimension_period(-1.0, 10.0).is_err());
        assert!(structure_coefficient_period(0.0, 0.075).is_err());
    }
}
