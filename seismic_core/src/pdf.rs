//! # PDF Generation Module
//!
//! Renders a [`CalculationReport`] as a paragraph+table document using Typst.
//!
//! ## Architecture
//!
//! - [`render_report_typst`] produces the Typst markup (title, project block,
//!   parameter table, one table per report table)
//! - [`render_report_pdf`] compiles that markup in a minimal in-memory world
//!   and returns raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use seismic_core::file_io::load_job;
//! use seismic_core::pdf::render_report_pdf;
//! use seismic_core::report::CalculationReport;
//! use std::path::Path;
//!
//! let job = load_job(Path::new("block_a.json")).unwrap();
//! let report = CalculationReport::from_job(&job, &job.run().unwrap());
//! let pdf_bytes = render_report_pdf(&report, 3).unwrap();
//! std::fs::write("block_a.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{CalcError, CalcResult};
use crate::report::{CalculationReport, ReportTable};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Bundled fonts from typst-assets
    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Document Template
// ============================================================================

const REPORT_HEADER: &str = r##"
#set page(
  paper: "a4",
  margin: 25mm,
  header: align(right)[
    #text(size: 9pt, fill: gray)[Stratify Seismic Calculations]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[{{TITLE}}]
  ]
]

#v(8pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Engineer:], [{{ENGINEER}}],
  [Job ID:], [{{JOB_ID}}],
  [Date:], [{{DATE}}],
)

#v(8pt)
#line(length: 100%, stroke: 0.5pt)
"##;

const REPORT_FOOTER: &str = r##"
#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#text(size: 9pt, fill: gray)[
  Equivalent static method only. Calculations should be verified by a licensed professional engineer.
]
"##;

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn typst_table(header: &[String], rows: &[Vec<String>]) -> String {
    let columns = header.len().max(1);
    let mut out = format!(
        "#table(\n  columns: {columns},\n  inset: 6pt,\n  stroke: 0.5pt,\n  table.header({}),\n",
        header
            .iter()
            .map(|h| format!("[*{}*]", escape_typst(h)))
            .collect::<Vec<_>>()
            .join(", ")
    );
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| format!("[{}]", escape_typst(c))).collect();
        out.push_str("  ");
        out.push_str(&cells.join(", "));
        out.push_str(",\n");
    }
    out.push_str(")\n");
    out
}

fn typst_report_table(table: &ReportTable, precision: usize) -> String {
    let rendered = table.render_rows(Some(precision));
    let body = match rendered.split_first() {
        Some((header, rows)) => typst_table(header, rows),
        None => String::new(),
    };
    format!("\n== {}\n\n{}", escape_typst(&table.title), body)
}

/// Typst markup for a report, numbers rounded to `precision` places.
pub fn render_report_typst(report: &CalculationReport, precision: usize) -> String {
    let mut source = REPORT_HEADER
        .replace("{{TITLE}}", &escape_typst(&report.title))
        .replace("{{ENGINEER}}", &escape_typst(&report.engineer))
        .replace("{{JOB_ID}}", &escape_typst(&report.job_id))
        .replace("{{DATE}}", &report.generated.format("%Y-%m-%d").to_string());

    let parameter_rows = report.parameter_rows(Some(precision));
    if let Some((header, rows)) = parameter_rows.split_first() {
        source.push_str("\n== Parameters and Results\n\n");
        source.push_str(&typst_table(header, rows));
    }

    for table in &report.tables {
        source.push_str(&typst_report_table(table, precision));
    }

    source.push_str(REPORT_FOOTER);
    source
}

/// Render a report to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::Internal)` - If Typst compilation or PDF export fails
pub fn render_report_pdf(report: &CalculationReport, precision: usize) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(render_report_typst(report, precision));

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    Ok(pdf_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::base_shear::{BaseShearInput, BuildingGeometry};
    use crate::calculations::storey::Storey;
    use crate::job::SeismicJob;
    use crate::reference::{SeismicZone, SiteClass, StructureType};

    fn test_report() -> CalculationReport {
        let input = BaseShearInput {
            label: "Block #1".to_string(),
            zone: SeismicZone::V,
            return_period_years: None,
            site_class: SiteClass::C,
            structure_type: StructureType::RcSmrf,
            importance_factor: 1.0,
            response_reduction: None,
            geometry: BuildingGeometry {
                height_m: 9.0,
                plan_x_m: 12.0,
                plan_y_m: 12.0,
                seismic_weight_kn: 4500.0,
            },
        };
        let storeys = Storey::from_arrays(&[1500.0; 3], &[3.0, 6.0, 9.0]).unwrap();
        let job = SeismicJob::new("Test Engineer", "TEST-001", input).with_storeys(storeys);
        CalculationReport::from_job(&job, &job.run().unwrap())
    }

    #[test]
    fn test_typst_source() {
        let source = render_report_typst(&test_report(), 2);
        assert!(source.contains("Block \\#1"));
        assert!(source.contains("== Parameters and Results"));
        assert!(source.contains("== Storey forces - direction Y"));
        assert!(source.contains("[0.36]"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_typst("[x]"), "\\[x\\]");
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_report_pdf(&test_report(), 3);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
