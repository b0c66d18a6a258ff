//! Path checks performed before any file is touched. Violations come back
//! as typed errors; the entry point decides how to present them.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Marker prepended to the source file name when no output path is given.
pub const RESULT_PREFIX: &str = "results_";

/// Windows device names that must never be used as file stems. Checked on
/// every platform so datasets stay portable.
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("source file {0} does not exist")]
    Missing(PathBuf),
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
    #[error("{0} is a reserved system name")]
    ReservedName(String),
    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),
}

/// The source path must exist, be a regular file, and not carry a reserved
/// stem.
pub fn validate_source(path: &Path) -> Result<(), PathError> {
    check_reserved(path)?;
    if !path.exists() {
        return Err(PathError::Missing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(PathError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// The output file itself may not exist yet, but its directory must, and
/// neither may use a reserved name.
pub fn validate_output(path: &Path) -> Result<(), PathError> {
    check_reserved(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.is_dir() {
        return Err(PathError::MissingOutputDir(dir));
    }
    Ok(())
}

/// Default output path: the source file name prefixed with `results_`,
/// placed beside the source file.
pub fn default_output_path(source: &Path) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{}{}", RESULT_PREFIX, file_name))
}

fn check_reserved(path: &Path) -> Result<(), PathError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_ascii_uppercase())
        .unwrap_or_default();
    if RESERVED_NAMES.contains(&stem.as_str()) {
        return Err(PathError::ReservedName(stem));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate_source_accepts_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("trips.json");
        fs::write(&file, "{}").unwrap();
        assert!(validate_source(&file).is_ok());
    }

    #[test]
    fn test_validate_source_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("absent.json");
        assert_eq!(validate_source(&file), Err(PathError::Missing(file)));
    }

    #[test]
    fn test_validate_source_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_source(dir.path()).unwrap_err();
        assert!(matches!(err, PathError::NotAFile(_)));
    }

    #[test]
    fn test_reserved_names_are_rejected() {
        let err = validate_source(Path::new("con.json")).unwrap_err();
        assert_eq!(err, PathError::ReservedName("CON".to_string()));

        let err = validate_output(Path::new("lpt3.csv")).unwrap_err();
        assert_eq!(err, PathError::ReservedName("LPT3".to_string()));
    }

    #[test]
    fn test_validate_output_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("out.json");
        assert!(validate_output(&ok).is_ok());

        let bad = dir.path().join("nope").join("out.json");
        let err = validate_output(&bad).unwrap_err();
        assert!(matches!(err, PathError::MissingOutputDir(_)));
    }

    #[test]
    fn test_default_output_name_gets_prefix() {
        let out = default_output_path(Path::new("/data/trips.json"));
        assert_eq!(out, PathBuf::from("/data/results_trips.json"));

        let out = default_output_path(Path::new("trips.csv"));
        assert_eq!(out, PathBuf::from("results_trips.csv"));
    }
}
