//! # Stratify Seismic CLI
//!
//! Terminal front end for the equivalent static seismic calculation.
//!
//! ```text
//! seismic_cli run block_a.json --csv block_a.csv --pdf block_a.pdf
//! seismic_cli compare block_a.json
//! seismic_cli demo
//! ```
//!
//! Set `RUST_LOG=debug` to see intermediate values.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use seismic_core::calculations::base_shear::{self, BaseShearInput, BaseShearResult, BuildingGeometry, Direction};
use seismic_core::calculations::combination::compare_static_and_rs;
use seismic_core::calculations::storey::StoreyForceTable;
use seismic_core::period::PeriodStrategy;
use seismic_core::reference::{SeismicZone, SiteClass, StructureType};
use seismic_core::report::{format_number, CalculationReport};
use seismic_core::spectrum::SpectrumProfile;
use seismic_core::{load_job, pdf, write_atomic, CalcError, CalcResult, CalculationSettings, SeismicJob};

#[derive(Parser, Debug)]
#[command(name = "seismic_cli", about = "IS 1893:2025 equivalent static base shear")]
struct Cli {
    /// Override the job's response spectrum profile
    #[arg(long, global = true, value_enum)]
    profile: Option<ProfileArg>,

    /// Override the job's period formula
    #[arg(long, global = true, value_enum)]
    period: Option<PeriodArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a job file: base shear and storey distribution
    Run {
        /// Job file (JSON)
        job: PathBuf,
        /// Write the report as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the report as PDF
        #[arg(long)]
        pdf: Option<PathBuf>,
        /// Print the raw results as JSON
        #[arg(long)]
        json: bool,
        /// Only print the storey table for this direction
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,
    },
    /// Compare equivalent static and response spectrum base shear
    Compare {
        /// Job file (JSON) with `response_spectrum_sa`
        job: PathBuf,
    },
    /// Prompt for a building and print its base shear
    Demo,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Banded,
    Soil,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PeriodArg {
    Plan,
    Coefficient,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    X,
    Y,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::X => Direction::X,
            DirectionArg::Y => Direction::Y,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, settings: &mut CalculationSettings) {
        if let Some(profile) = self.profile {
            settings.spectrum_profile = match profile {
                ProfileArg::Banded => SpectrumProfile::Banded,
                ProfileArg::Soil => SpectrumProfile::Soil,
            };
        }
        if let Some(period) = self.period {
            settings.period_strategy = match period {
                PeriodArg::Plan => PeriodStrategy::PlanDimension,
                PeriodArg::Coefficient => PeriodStrategy::StructureCoefficient,
            };
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match &cli.command {
        Commands::Run {
            job,
            csv,
            pdf,
            json,
            direction,
        } => run_job(&cli, job, csv.as_deref(), pdf.as_deref(), *json, direction.map(Direction::from)),
        Commands::Compare { job } => compare_job(&cli, job),
        Commands::Demo => demo(&cli),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_with_overrides(cli: &Cli, path: &Path) -> CalcResult<SeismicJob> {
    let mut job = load_job(path)?;
    cli.apply_overrides(&mut job.settings);
    Ok(job)
}

fn run_job(
    cli: &Cli,
    path: &Path,
    csv: Option<&Path>,
    pdf_path: Option<&Path>,
    json: bool,
    only_direction: Option<Direction>,
) -> CalcResult<()> {
    let job = load_with_overrides(cli, path)?;
    let input = job.resolved_input()?;
    let output = job.run()?;
    let precision = job.settings.display_precision;

    print_base_shear(&input, &output.base_shear, precision);
    for table in output
        .tables
        .iter()
        .filter(|t| only_direction.map_or(true, |d| t.direction == d))
    {
        print_storey_table(table, precision);
    }

    let report = CalculationReport::from_job(&job, &output);
    if let Some(csv_path) = csv {
        write_atomic(csv_path, report.to_csv(None).as_bytes())?;
        info!("CSV written to {}", csv_path.display());
        println!("CSV written to {}", csv_path.display());
    }
    if let Some(pdf_path) = pdf_path {
        let bytes = pdf::render_report_pdf(&report, precision)?;
        write_atomic(pdf_path, &bytes)?;
        info!("PDF written to {}", pdf_path.display());
        println!("PDF written to {}", pdf_path.display());
    }

    if json {
        println!();
        println!("JSON Output (for LLM/API use):");
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn compare_job(cli: &Cli, path: &Path) -> CalcResult<()> {
    let job = load_with_overrides(cli, path)?;
    let sa = job
        .response_spectrum_sa
        .ok_or_else(|| CalcError::validation("response_spectrum_sa", "Job has no response spectrum Sa/g"))?;
    let input = job.resolved_input()?;
    let precision = job.settings.display_precision;

    for direction in Direction::ALL {
        let result = compare_static_and_rs(&input, &job.settings, sa, direction)?;
        println!();
        println!("Static vs Response Spectrum - direction {}", direction);
        println!("{:<20} {:>10} {:>16}", "Method", "Sa/g", "Base Shear (kN)");
        for row in &result.rows {
            let sa_cell = row
                .spectral_ratio
                .map_or_else(|| "-".to_string(), |v| format_number(v, Some(precision)));
            println!(
                "{:<20} {:>10} {:>16}",
                row.method.display_name(),
                sa_cell,
                format_number(row.base_shear_kn, Some(precision))
            );
        }
        if result.static_floor_governs {
            println!("0.8 x static base shear governs");
        }
    }
    Ok(())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn demo(cli: &Cli) -> CalcResult<()> {
    println!("Stratify Seismic CLI - IS 1893:2025 Equivalent Static Method");
    println!("=============================================================");
    println!();

    let zone = match prompt_line("Seismic zone (II-VI) [IV]: ") {
        Some(s) => SeismicZone::from_str_flexible(&s)?,
        None => SeismicZone::IV,
    };
    let site_class = match prompt_line("Site class (A/B, C, D) or Vs in m/s [A/B]: ") {
        Some(s) => match s.parse::<f64>() {
            Ok(vs) => SiteClass::from_shear_wave_velocity(vs)?,
            Err(_) => SiteClass::from_str_flexible(&s)?,
        },
        None => SiteClass::AB,
    };
    let structure_type = match prompt_line("Structure type (RC-OMRF, RC-SMRF, Steel-MRF, Shear-Wall) [RC-SMRF]: ") {
        Some(s) => StructureType::from_str_flexible(&s)?,
        None => StructureType::RcSmrf,
    };
    let height_m = prompt_f64("Building height (m) [15.0]: ", 15.0);
    let plan_x_m = prompt_f64("Plan dimension X (m) [10.0]: ", 10.0);
    let plan_y_m = prompt_f64("Plan dimension Y (m) [10.0]: ", plan_x_m);
    let seismic_weight_kn = prompt_f64("Seismic weight (kN) [10000.0]: ", 10_000.0);

    let input = BaseShearInput {
        label: "CLI-Demo".to_string(),
        zone,
        return_period_years: None,
        site_class,
        structure_type,
        importance_factor: 1.0,
        response_reduction: None,
        geometry: BuildingGeometry {
            height_m,
            plan_x_m,
            plan_y_m,
            seismic_weight_kn,
        },
    };

    let mut settings = CalculationSettings::default();
    cli.apply_overrides(&mut settings);
    let result = base_shear::calculate(&input, &settings)?;
    print_base_shear(&input, &result, settings.display_precision);
    Ok(())
}

fn print_base_shear(input: &BaseShearInput, result: &BaseShearResult, precision: usize) {
    let n = |v: f64| format_number(v, Some(precision));
    println!();
    println!("═══════════════════════════════════════");
    println!("  BASE SHEAR - {}", if input.label.is_empty() { "Building" } else { input.label.as_str() });
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  {}  {}  {}", input.zone, input.site_class, input.structure_type);
    println!(
        "  Z = {}  I = {}  R = {}",
        n(result.zone_factor),
        n(result.importance_factor),
        n(result.response_reduction)
    );
    println!(
        "  H = {} m  W = {} kN  ({})",
        n(input.geometry.height_m),
        n(result.seismic_weight_kn),
        result.period_strategy.equation()
    );
    println!();
    for shear in [&result.x, &result.y] {
        println!(
            "  {}: T = {} s  Sa/g = {}  Ah = {}  V = {} kN",
            shear.direction,
            n(shear.period_s),
            n(shear.spectral_ratio),
            n(shear.design_coefficient),
            n(shear.base_shear_kn)
        );
    }
    println!(
        "  Vertical: Av = {}  Vv = {} kN",
        n(result.vertical.design_coefficient),
        n(result.vertical.base_shear_kn)
    );
}

fn print_storey_table(table: &StoreyForceTable, precision: usize) {
    let n = |v: f64| format_number(v, Some(precision));
    println!();
    println!("Storey forces - direction {}", table.direction);
    println!(
        "{:>6} {:>10} {:>8} {:>14} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Storey", "W (kN)", "H (m)", "W·H²", "Qh", "Vh", "Qv", "Vv", "Vcomb"
    );
    for row in table.rows.iter().rev() {
        println!(
            "{:>6} {:>10} {:>8} {:>14} {:>10} {:>10} {:>10} {:>10} {:>10}",
            row.level,
            n(row.weight_kn),
            n(row.height_m),
            n(row.load_factor),
            n(row.horizontal_force_kn),
            n(row.horizontal_shear_kn),
            n(row.vertical_force_kn),
            n(row.vertical_shear_kn),
            row.combined_shear_kn.map_or_else(|| "-".to_string(), n)
        );
    }
}
