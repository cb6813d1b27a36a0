//! Shared plumbing for the semicolon-delimited flat files.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::shared::errors::{AppError, AppResult};

pub(crate) const DELIMITER: u8 = b';';

/// The field separator cannot appear inside a cell; it is replaced
/// with a comma on write. Lossy on purpose, matching the file's
/// historical convention.
pub(crate) fn sanitize_field(field: &str) -> String {
    field.replace(';', ",")
}

/// Read a flat file tolerantly: invalid UTF-8 bytes are replaced so a
/// legacy cp1252 file never aborts the load.
pub(crate) fn read_lossy(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::NotFound(format!("File not found: {}", path.display()))
        }
        _ => AppError::StorageError(format!("Cannot read {}: {}", path.display(), e)),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Verify that every expected header is present, in order, at the
/// start of the header row.
pub(crate) fn check_headers(actual: &csv::StringRecord, expected: &[&str]) -> AppResult<()> {
    for (i, name) in expected.iter().enumerate() {
        match actual.get(i) {
            Some(found) if found.trim() == *name => {}
            Some(found) => {
                return Err(AppError::InvalidInput(format!(
                    "Malformed header: expected column {} to be '{}', found '{}'",
                    i + 1,
                    name,
                    found.trim()
                )))
            }
            None => {
                return Err(AppError::InvalidInput(format!(
                    "Malformed header: missing column '{}'",
                    name
                )))
            }
        }
    }
    Ok(())
}

/// Atomically replace `path` with `contents`: write a sibling temp
/// file, then rename over the target. A failed write never leaves a
/// partial file behind.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> AppResult<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new_in("."),
    }
    .map_err(|e| AppError::StorageError(format!("Cannot create temp file: {}", e)))?;

    tmp.write_all(contents)
        .map_err(|e| AppError::StorageError(format!("Write failed: {}", e)))?;
    tmp.flush()
        .map_err(|e| AppError::StorageError(format!("Write failed: {}", e)))?;
    tmp.persist(path)
        .map_err(|e| AppError::StorageError(format!("Cannot replace {}: {}", path.display(), e)))?;
    Ok(())
}
