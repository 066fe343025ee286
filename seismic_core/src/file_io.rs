//! # File I/O Module
//!
//! Job files and report exports:
//! - **Atomic writes**: write to `.tmp`, sync, rename, so an interrupted
//!   export never leaves a truncated file behind
//! - **Version validation**: job files from an incompatible schema are
//!   rejected on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use seismic_core::file_io::{load_job, write_atomic};
//! use seismic_core::report::CalculationReport;
//! use std::path::Path;
//!
//! let job = load_job(Path::new("block_a.json"))?;
//! let output = job.run()?;
//! let report = CalculationReport::from_job(&job, &output);
//! write_atomic(Path::new("block_a.csv"), report.to_csv(None).as_bytes())?;
//! # Ok::<(), seismic_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{CalcError, CalcResult};
use crate::job::{SeismicJob, SCHEMA_VERSION};

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write bytes to `path` with atomic write semantics.
///
/// 1. Write to a temporary file next to the target (`<path>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Save a job as pretty-printed JSON.
pub fn save_job(job: &SeismicJob, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(job)?;
    write_atomic(path, json.as_bytes())
}

/// Load a job from a JSON file.
///
/// # Returns
///
/// * `Ok(SeismicJob)` - Successfully loaded job
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_job(path: &Path) -> CalcResult<SeismicJob> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let job: SeismicJob =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&job.meta.version)?;
    debug!("loaded job '{}' from {}", job.meta.job_id, path.display());

    Ok(job)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version is not readable
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::base_shear::{BaseShearInput, BuildingGeometry};
    use crate::calculations::storey::Storey;
    use crate::reference::{SeismicZone, SiteClass, StructureType};
    use tempfile::TempDir;

    fn temp_job_path(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join(format!("{}.json", name))
    }

    fn test_job() -> SeismicJob {
        let input = BaseShearInput {
            label: "IO".to_string(),
            zone: SeismicZone::II,
            return_period_years: None,
            site_class: SiteClass::D,
            structure_type: StructureType::RcOmrf,
            importance_factor: 1.5,
            response_reduction: None,
            geometry: BuildingGeometry {
                height_m: 6.0,
                plan_x_m: 8.0,
                plan_y_m: 8.0,
                seismic_weight_kn: 1500.0,
            },
        };
        SeismicJob::new("Test Engineer", "TEST-001", input)
            .with_storeys(vec![Storey::new(750.0, 3.0), Storey::new(750.0, 6.0)])
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = temp_job_path(&dir, "roundtrip");
        let job = test_job();
        save_job(&job, &path).unwrap();

        let loaded = load_job(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.storeys.len(), 2);
        assert_eq!(loaded.input.zone, SeismicZone::II);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = temp_job_path(&dir, "atomic");
        write_atomic(&path, b"level,force\n1,10\n").unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "level,force\n1,10\n");
    }

    #[test]
    fn test_atomic_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = temp_job_path(&dir, "replace");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_job(Path::new("/nonexistent/seismic_job.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let dir = TempDir::new().unwrap();
        let path = temp_job_path(&dir, "newer_schema");
        let mut job = test_job();
        job.meta.version = "0.9.0".to_string();
        save_job(&job, &path).unwrap();

        let err = load_job(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("abc").is_err());
    }
}
