//! # Seismic Job
//!
//! A `SeismicJob` bundles everything one evaluation needs: metadata,
//! settings, the base shear input, the storey sequence and optionally a
//! response spectrum ordinate for the static-vs-RS check. Jobs serialize to
//! human-readable JSON.
//!
//! ```text
//! SeismicJob
//! ├── meta: JobMetadata (version, engineer, job id, client, created)
//! ├── settings: CalculationSettings
//! ├── input: BaseShearInput
//! ├── storeys: Vec<Storey> (base to top)
//! ├── shear_wave_velocity: Option<f64> (reclassifies the site)
//! └── response_spectrum_sa: Option<f64>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use seismic_core::job::SeismicJob;
//!
//! let json = r#"{
//!   "meta": { "engineer": "A. Engineer", "job_id": "25-014" },
//!   "input": {
//!     "zone": "IV", "site_class": "A/B", "structure_type": "RC-SMRF",
//!     "geometry": { "height_m": 15.0, "plan_x_m": 10.0, "plan_y_m": 10.0, "seismic_weight_kn": 10000.0 }
//!   },
//!   "storeys": [
//!     { "weight_kn": 5000.0, "height_m": 7.5 },
//!     { "weight_kn": 5000.0, "height_m": 15.0 }
//!   ]
//! }"#;
//!
//! let job: SeismicJob = serde_json::from_str(json).unwrap();
//! let output = job.run().unwrap();
//! assert_eq!(output.tables.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::calculations::base_shear::{BaseShearInput, BaseShearResult, Direction};
use crate::calculations::combination::{compare_static_and_rs, ComparisonResult};
use crate::calculations::storey::{Storey, StoreyForceTable};
use crate::errors::CalcResult;
use crate::pipeline::SeismicPipeline;
use crate::reference::SiteClass;
use crate::settings::CalculationSettings;

/// Current schema version for job files
pub const SCHEMA_VERSION: &str = "0.1.0";

fn schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Job metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Schema version (for migration compatibility)
    #[serde(default = "schema_version")]
    pub version: String,

    /// Name of the responsible engineer
    #[serde(default)]
    pub engineer: String,

    /// Job/project number
    #[serde(default)]
    pub job_id: String,

    /// Client name
    #[serde(default)]
    pub client: String,

    /// When the job was created
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

impl Default for JobMetadata {
    fn default() -> Self {
        JobMetadata {
            version: schema_version(),
            engineer: String::new(),
            job_id: String::new(),
            client: String::new(),
            created: Utc::now(),
        }
    }
}

/// Root job container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicJob {
    #[serde(default)]
    pub meta: JobMetadata,

    #[serde(default)]
    pub settings: CalculationSettings,

    pub input: BaseShearInput,

    /// Storeys base to top; empty skips the distribution
    #[serde(default)]
    pub storeys: Vec<Storey>,

    /// Average shear wave velocity Vs (m/s); when set, the site class is
    /// derived from it and replaces `input.site_class`
    #[serde(default)]
    pub shear_wave_velocity: Option<f64>,

    /// Sa/g from a response spectrum analysis, for the governing shear check
    #[serde(default)]
    pub response_spectrum_sa: Option<f64>,
}

/// Everything a job run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOutput {
    /// Site class the run used (after any Vs classification)
    pub site_class: SiteClass,
    pub base_shear: BaseShearResult,
    /// One table per plan direction (X then Y) when storeys are given
    pub tables: Vec<StoreyForceTable>,
    /// Static vs RS comparison in the governing direction
    pub comparison: Option<ComparisonResult>,
}

impl SeismicJob {
    /// Create a job with default settings and no storeys.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, input: BaseShearInput) -> Self {
        SeismicJob {
            meta: JobMetadata {
                engineer: engineer.into(),
                job_id: job_id.into(),
                ..JobMetadata::default()
            },
            settings: CalculationSettings::default(),
            input,
            storeys: Vec::new(),
            shear_wave_velocity: None,
            response_spectrum_sa: None,
        }
    }

    /// Set the storey sequence (builder pattern)
    pub fn with_storeys(mut self, storeys: Vec<Storey>) -> Self {
        self.storeys = storeys;
        self
    }

    /// Set the shear wave velocity used to classify the site (builder pattern)
    pub fn with_shear_wave_velocity(mut self, vs_m_per_s: f64) -> Self {
        self.shear_wave_velocity = Some(vs_m_per_s);
        self
    }

    /// The base shear input with the site class resolved from Vs, if given.
    pub fn resolved_input(&self) -> CalcResult<BaseShearInput> {
        let mut input = self.input.clone();
        if let Some(vs) = self.shear_wave_velocity {
            input.site_class = SiteClass::from_shear_wave_velocity(vs)?;
            if input.site_class != self.input.site_class {
                info!(
                    "Vs = {} m/s classifies the site as {}, replacing {}",
                    vs, input.site_class, self.input.site_class
                );
            }
        }
        Ok(input)
    }

    /// Set the response spectrum ordinate (builder pattern)
    pub fn with_response_spectrum(mut self, sa: f64) -> Self {
        self.response_spectrum_sa = Some(sa);
        self
    }

    /// Run base shear, distribution in both directions, and the optional
    /// static-vs-RS comparison.
    pub fn run(&self) -> CalcResult<JobOutput> {
        let input = self.resolved_input()?;
        let mut pipeline = SeismicPipeline::new(self.settings.clone());
        let base_shear = pipeline.compute_base_shear(&input)?.clone();

        let tables = if self.storeys.is_empty() {
            Vec::new()
        } else {
            Direction::ALL
                .iter()
                .map(|&d| pipeline.distribute(&self.storeys, d))
                .collect::<CalcResult<Vec<_>>>()?
        };

        let comparison = match self.response_spectrum_sa {
            Some(sa) => Some(compare_static_and_rs(
                &input,
                &self.settings,
                sa,
                base_shear.governing_horizontal().direction,
            )?),
            None => None,
        };

        Ok(JobOutput {
            site_class: input.site_class,
            base_shear,
            tables,
            comparison,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::base_shear::BuildingGeometry;
    use crate::reference::{SeismicZone, SiteClass, StructureType};

    fn test_input() -> BaseShearInput {
        BaseShearInput {
            label: "Job Block".to_string(),
            zone: SeismicZone::III,
            return_period_years: Some(975),
            site_class: SiteClass::C,
            structure_type: StructureType::SteelMrf,
            importance_factor: 1.2,
            response_reduction: None,
            geometry: BuildingGeometry {
                height_m: 12.0,
                plan_x_m: 18.0,
                plan_y_m: 30.0,
                seismic_weight_kn: 7200.0,
            },
        }
    }

    #[test]
    fn test_job_creation() {
        let job = SeismicJob::new("Jane Engineer", "25-042", test_input());
        assert_eq!(job.meta.engineer, "Jane Engineer");
        assert_eq!(job.meta.version, SCHEMA_VERSION);
        assert!(job.storeys.is_empty());
    }

    #[test]
    fn test_run_without_storeys() {
        let output = SeismicJob::new("E", "J", test_input()).run().unwrap();
        assert!(output.tables.is_empty());
        assert!(output.comparison.is_none());
        assert_eq!(output.base_shear.zone_factor, 0.22);
    }

    #[test]
    fn test_run_full_job() {
        let storeys = Storey::from_arrays(&[2400.0; 3], &[4.0, 8.0, 12.0]).unwrap();
        let job = SeismicJob::new("E", "J", test_input())
            .with_storeys(storeys)
            .with_response_spectrum(0.8);
        let output = job.run().unwrap();

        assert_eq!(output.tables.len(), 2);
        assert_eq!(output.tables[0].direction, Direction::X);
        assert_eq!(output.tables[1].direction, Direction::Y);
        let comparison = output.comparison.unwrap();
        assert_eq!(comparison.direction, output.base_shear.governing_horizontal().direction);
    }

    #[test]
    fn test_shear_wave_velocity_reclassifies_site() {
        let plain = SeismicJob::new("E", "J", test_input()).run().unwrap();
        let soft = SeismicJob::new("E", "J", test_input())
            .with_shear_wave_velocity(250.0)
            .run()
            .unwrap();

        assert_eq!(plain.site_class, SiteClass::C);
        assert_eq!(soft.site_class, SiteClass::D);
        assert!(soft.base_shear.vertical.vertical_ratio > plain.base_shear.vertical.vertical_ratio);
    }

    #[test]
    fn test_shear_wave_velocity_from_json() {
        let json = r#"{
            "input": {
                "zone": "IV", "site_class": "D", "structure_type": "RC-OMRF",
                "geometry": { "height_m": 20.0, "plan_x_m": 0.0, "plan_y_m": 0.0, "seismic_weight_kn": 8000.0 }
            },
            "settings": { "spectrum_profile": "Soil", "period_strategy": "StructureCoefficient" },
            "shear_wave_velocity": 800.0
        }"#;
        let job: SeismicJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.resolved_input().unwrap().site_class, SiteClass::AB);
        assert_eq!(job.run().unwrap().site_class, SiteClass::AB);

        let bad = job.clone().with_shear_wave_velocity(0.0);
        assert_eq!(bad.run().unwrap_err().error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_job_serialization_roundtrip() {
        let job = SeismicJob::new("Jane Engineer", "25-042", test_input())
            .with_storeys(vec![Storey::new(1000.0, 3.0)]);
        let json = serde_json::to_string_pretty(&job).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("IS 1893:2025"));

        let roundtrip: SeismicJob = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, job);
    }
}
