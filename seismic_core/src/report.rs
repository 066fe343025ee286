//! # Calculation Report
//!
//! Flattens a job run into the two shapes the presentation layer consumes:
//!
//! - a key-value parameter record (inputs and base shear results)
//! - row tables (storey forces per direction, static vs RS comparison)
//!
//! Values are kept at full precision. Rounding happens only when rows are
//! rendered with a display precision; `None` renders each number with its
//! shortest round-trip representation, so a CSV written that way loses
//! nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::base_shear::{BaseShearInput, BaseShearResult};
use crate::calculations::combination::ComparisonResult;
use crate::calculations::storey::StoreyForceTable;
use crate::job::{JobOutput, SeismicJob};
use crate::settings::CalculationSettings;

/// A report cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Text(String),
}

impl ReportValue {
    /// Render with `precision` decimal places, or losslessly when `None`
    pub fn render(&self, precision: Option<usize>) -> String {
        match self {
            ReportValue::Number(v) => format_number(*v, precision),
            ReportValue::Text(s) => s.clone(),
        }
    }
}

/// Format a number for display (`Some(p)`) or losslessly (`None`)
pub fn format_number(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => value.to_string(),
    }
}

/// One line of the parameter record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub key: String,
    pub value: ReportValue,
    pub unit: String,
}

impl ReportEntry {
    fn number(key: &str, value: f64, unit: &str) -> Self {
        ReportEntry {
            key: key.to_string(),
            value: ReportValue::Number(value),
            unit: unit.to_string(),
        }
    }

    fn text(key: &str, value: impl Into<String>) -> Self {
        ReportEntry {
            key: key.to_string(),
            value: ReportValue::Text(value.into()),
            unit: String::new(),
        }
    }
}

/// A titled table: header plus rows of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<ReportValue>>,
}

impl ReportTable {
    /// Header followed by rendered rows
    pub fn render_rows(&self, precision: Option<usize>) -> Vec<Vec<String>> {
        std::iter::once(self.header.clone())
            .chain(
                self.rows
                    .iter()
                    .map(|row| row.iter().map(|cell| cell.render(precision)).collect()),
            )
            .collect()
    }
}

/// Complete report for one job run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub title: String,
    pub engineer: String,
    pub job_id: String,
    pub generated: DateTime<Utc>,
    pub parameters: Vec<ReportEntry>,
    pub tables: Vec<ReportTable>,
}

const STOREY_HEADER: [&str; 9] = [
    "Storey",
    "Weight (kN)",
    "Height (m)",
    "W·H² (kN·m²)",
    "Qh (kN)",
    "Vh (kN)",
    "Qv (kN)",
    "Vv (kN)",
    "V combined (kN)",
];

/// Key-value record of inputs and base shear results
pub fn parameter_record(
    input: &BaseShearInput,
    settings: &CalculationSettings,
    result: &BaseShearResult,
) -> Vec<ReportEntry> {
    let g = &input.geometry;
    let mut entries = vec![
        ReportEntry::text("Code", settings.code.clone()),
        ReportEntry::text("Seismic zone", input.zone.code()),
        ReportEntry::text(
            "Return period",
            input
                .return_period_years
                .map_or_else(|| "base (475 years)".to_string(), |y| format!("{y} years")),
        ),
        ReportEntry::text("Site class", input.site_class.code()),
        ReportEntry::text("Structure type", input.structure_type.display_name()),
        ReportEntry::text("Spectrum profile", settings.spectrum_profile.display_name()),
        ReportEntry::text("Period formula", settings.period_strategy.equation()),
        ReportEntry::number("Zone factor Z", result.zone_factor, ""),
        ReportEntry::number("Importance factor I", result.importance_factor, ""),
        ReportEntry::number("Response reduction R", result.response_reduction, ""),
        ReportEntry::number("Height H", g.height_m, "m"),
        ReportEntry::number("Plan dimension X", g.plan_x_m, "m"),
        ReportEntry::number("Plan dimension Y", g.plan_y_m, "m"),
        ReportEntry::number("Seismic weight W", result.seismic_weight_kn, "kN"),
    ];
    for shear in [&result.x, &result.y] {
        let d = shear.direction;
        entries.push(ReportEntry::number(&format!("Period T{d}"), shear.period_s, "s"));
        entries.push(ReportEntry::number(&format!("Sa/g ({d})"), shear.spectral_ratio, ""));
        entries.push(ReportEntry::number(&format!("Ah ({d})"), shear.design_coefficient, ""));
        entries.push(ReportEntry::number(&format!("Base shear V{d}"), shear.base_shear_kn, "kN"));
    }
    let v = &result.vertical;
    entries.push(ReportEntry::number("Vertical period", v.period_s, "s"));
    entries.push(ReportEntry::number("Vertical ratio", v.vertical_ratio, ""));
    entries.push(ReportEntry::number("Av", v.design_coefficient, ""));
    entries.push(ReportEntry::number("Vertical base shear Vv", v.base_shear_kn, "kN"));
    entries
}

/// Storey force table as a report table
pub fn storey_table(table: &StoreyForceTable) -> ReportTable {
    ReportTable {
        title: format!("Storey forces - direction {}", table.direction),
        header: STOREY_HEADER.iter().map(|s| s.to_string()).collect(),
        rows: table
            .rows
            .iter()
            .map(|r| {
                vec![
                    ReportValue::Text(r.level.to_string()),
                    ReportValue::Number(r.weight_kn),
                    ReportValue::Number(r.height_m),
                    ReportValue::Number(r.load_factor),
                    ReportValue::Number(r.horizontal_force_kn),
                    ReportValue::Number(r.horizontal_shear_kn),
                    ReportValue::Number(r.vertical_force_kn),
                    ReportValue::Number(r.vertical_shear_kn),
                    r.combined_shear_kn
                        .map_or_else(|| ReportValue::Text("-".to_string()), ReportValue::Number),
                ]
            })
            .collect(),
    }
}

/// Static vs RS comparison as a report table
pub fn comparison_table(comparison: &ComparisonResult) -> ReportTable {
    ReportTable {
        title: format!("Static vs response spectrum - direction {}", comparison.direction),
        header: vec![
            "Method".to_string(),
            "Sa/g".to_string(),
            "Base Shear (kN)".to_string(),
        ],
        rows: comparison
            .rows
            .iter()
            .map(|row| {
                vec![
                    ReportValue::Text(row.method.display_name().to_string()),
                    row.spectral_ratio
                        .map_or_else(|| ReportValue::Text("-".to_string()), ReportValue::Number),
                    ReportValue::Number(row.base_shear_kn),
                ]
            })
            .collect(),
    }
}

impl CalculationReport {
    /// Build the report for a job and its output.
    pub fn from_job(job: &SeismicJob, output: &JobOutput) -> Self {
        let mut tables: Vec<ReportTable> = output.tables.iter().map(storey_table).collect();
        if let Some(comparison) = &output.comparison {
            tables.push(comparison_table(comparison));
        }
        let label = if job.input.label.is_empty() {
            "Equivalent Static Method".to_string()
        } else {
            job.input.label.clone()
        };
        let mut input = job.input.clone();
        input.site_class = output.site_class;
        let mut parameters = parameter_record(&input, &job.settings, &output.base_shear);
        if let Some(vs) = job.shear_wave_velocity {
            let at = parameters
                .iter()
                .position(|e| e.key == "Site class")
                .map_or(parameters.len(), |i| i + 1);
            parameters.insert(at, ReportEntry::number("Shear wave velocity Vs", vs, "m/s"));
        }
        CalculationReport {
            title: format!("{} Seismic Base Shear - {}", job.settings.code, label),
            engineer: job.meta.engineer.clone(),
            job_id: job.meta.job_id.clone(),
            generated: Utc::now(),
            parameters,
            tables,
        }
    }

    /// Parameter record as `[Parameter, Value, Unit]` rows with header
    pub fn parameter_rows(&self, precision: Option<usize>) -> Vec<Vec<String>> {
        std::iter::once(vec![
            "Parameter".to_string(),
            "Value".to_string(),
            "Unit".to_string(),
        ])
        .chain(self.parameters.iter().map(|e| {
            vec![e.key.clone(), e.value.render(precision), e.unit.clone()]
        }))
        .collect()
    }

    /// Row-oriented export: parameter block, then each table separated by a
    /// blank line and preceded by its title.
    pub fn to_csv(&self, precision: Option<usize>) -> String {
        let mut out = String::new();
        push_csv_rows(&mut out, &self.parameter_rows(precision));
        for table in &self.tables {
            out.push('\n');
            push_csv_rows(&mut out, &[vec![table.title.clone()]]);
            push_csv_rows(&mut out, &table.render_rows(precision));
        }
        out
    }
}

fn push_csv_rows(out: &mut String, rows: &[Vec<String>]) {
    for row in rows {
        let line: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
}

fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
