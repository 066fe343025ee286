//! # Two-Phase Calculation Pipeline
//!
//! Base shear is computed once and frozen; storey distribution then works
//! from the frozen result, however many times the storey data is edited.
//!
//! ```text
//! Empty --compute_base_shear--> BaseShearComputed --reset--> Empty
//!                                  |
//!                                  +--distribute(storeys)--> StoreyForceTable
//! ```
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::calculations::{BaseShearInput, BuildingGeometry, Direction, Storey};
//! use seismic_core::pipeline::SeismicPipeline;
//! use seismic_core::reference::{SeismicZone, SiteClass, StructureType};
//! use seismic_core::settings::CalculationSettings;
//!
//! let input = BaseShearInput {
//!     label: "B-1".to_string(),
//!     zone: SeismicZone::III,
//!     return_period_years: None,
//!     site_class: SiteClass::C,
//!     structure_type: StructureType::RcSmrf,
//!     importance_factor: 1.0,
//!     response_reduction: None,
//!     geometry: BuildingGeometry { height_m: 9.0, plan_x_m: 12.0, plan_y_m: 18.0, seismic_weight_kn: 6000.0 },
//! };
//!
//! let mut pipeline = SeismicPipeline::new(CalculationSettings::default());
//! pipeline.compute_base_shear(&input).unwrap();
//!
//! let storeys = Storey::from_arrays(&[2000.0; 3], &[3.0, 6.0, 9.0]).unwrap();
//! let table = pipeline.distribute(&storeys, Direction::X).unwrap();
//! assert_eq!(table.rows.len(), 3);
//! ```

use log::info;

use crate::calculations::base_shear::{self, BaseShearInput, BaseShearResult, Direction};
use crate::calculations::storey::{Storey, StoreyForceTable};
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalculationSettings;

/// Pipeline state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineState {
    #[default]
    Empty,
    BaseShearComputed(BaseShearResult),
}

/// Holds settings and, once computed, an immutable base shear result.
#[derive(Debug, Clone)]
pub struct SeismicPipeline {
    settings: CalculationSettings,
    state: PipelineState,
}

impl SeismicPipeline {
    pub fn new(settings: CalculationSettings) -> Self {
        SeismicPipeline {
            settings,
            state: PipelineState::Empty,
        }
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The frozen base shear result, if computed
    pub fn base_shear(&self) -> Option<&BaseShearResult> {
        match &self.state {
            PipelineState::Empty => None,
            PipelineState::BaseShearComputed(result) => Some(result),
        }
    }

    /// Compute and freeze the base shear, replacing any earlier result.
    ///
    /// On error the pipeline keeps its previous state.
    pub fn compute_base_shear(&mut self, input: &BaseShearInput) -> CalcResult<&BaseShearResult> {
        let result = base_shear::calculate(input, &self.settings)?;
        info!(
            "base shear computed for '{}': Vx = {:.2} kN, Vy = {:.2} kN, Vv = {:.2} kN",
            input.label, result.x.base_shear_kn, result.y.base_shear_kn, result.vertical.base_shear_kn
        );
        self.state = PipelineState::BaseShearComputed(result);
        self.base_shear().ok_or_else(|| CalcError::Internal {
            message: "base shear state was not stored".to_string(),
        })
    }

    /// Distribute the frozen base shear over `storeys`.
    ///
    /// # Errors
    ///
    /// `NotComputed` when called before [`compute_base_shear`](Self::compute_base_shear).
    pub fn distribute(&self, storeys: &[Storey], direction: Direction) -> CalcResult<StoreyForceTable> {
        let result = self
            .base_shear()
            .ok_or_else(|| CalcError::not_computed("base shear"))?;
        StoreyForceTable::build(result, storeys, direction, self.settings.combine_vertical)
    }

    /// Discard the frozen result
    pub fn reset(&mut self) {
        self.state = PipelineState::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::base_shear::BuildingGeometry;
    use crate::reference::{SeismicZone, SiteClass, StructureType};

    fn test_input() -> BaseShearInput {
        BaseShearInput {
            label: "Pipeline".to_string(),
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

    fn storeys() -> Vec<Storey> {
        Storey::from_arrays(&[2000.0; 5], &[3.0, 6.0, 9.0, 12.0, 15.0]).unwrap()
    }

    #[test]
    fn test_distribute_before_compute() {
        let pipeline = SeismicPipeline::new(CalculationSettings::default());
        let err = pipeline.distribute(&storeys(), Direction::X).unwrap_err();
        assert_eq!(err.error_code(), "NOT_COMPUTED");
    }

    #[test]
    fn test_two_phase_workflow() {
        let mut pipeline = SeismicPipeline::new(CalculationSettings::default());
        let vx = pipeline.compute_base_shear(&test_input()).unwrap().x.base_shear_kn;

        let table = pipeline.distribute(&storeys(), Direction::X).unwrap();
        assert!((table.base_storey_shear_kn() - vx).abs() < 1e-9);
        assert!(table.rows.iter().all(|r| r.combined_shear_kn.is_some()));

        // Editing storeys reuses the frozen result
        let edited = Storey::from_arrays(&[1000.0, 3000.0], &[4.0, 8.0]).unwrap();
        let table = pipeline.distribute(&edited, Direction::Y).unwrap();
        assert_eq!(table.horizontal_base_shear_kn, vx);

        pipeline.reset();
        assert_eq!(pipeline.state(), &PipelineState::Empty);
    }

    #[test]
    fn test_failed_compute_keeps_previous_result() {
        let mut pipeline = SeismicPipeline::new(CalculationSettings::default());
        pipeline.compute_base_shear(&test_input()).unwrap();

        let mut bad = test_input();
        bad.geometry.height_m = 0.0;
        assert!(pipeline.compute_base_shear(&bad).is_err());
        assert!(pipeline.base_shear().is_some());
    }

    #[test]
    fn test_combination_can_be_disabled() {
        let settings = CalculationSettings {
            combine_vertical: false,
            ..CalculationSettings::default()
        };
        let mut pipeline = SeismicPipeline::new(settings);
        pipeline.compute_base_shear(&test_input()).unwrap();
        let table = pipeline.distribute(&storeys(), Direction::X).unwrap();
        assert!(table.rows.iter().all(|r| r.combined_shear_kn.is_none()));
    }
}
