//! Writers for result files and JSON outputs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use divmine_core::errors::DatasetError;
use serde::Serialize;

use crate::coverage::PatternCover;

fn create(path: &Path) -> Result<BufWriter<File>, DatasetError> {
    let io_error = |e: std::io::Error| DatasetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    File::create(path).map(BufWriter::new).map_err(io_error)
}

/// Write one `[ pattern ] [ cover ]` line per entry, in order.
pub fn write_results(path: &Path, covers: &[PatternCover]) -> Result<(), DatasetError> {
    let io_error = |e: std::io::Error| DatasetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let mut out = create(path)?;
    for entry in covers {
        writeln!(out, "[ {} ] [ {} ]", entry.pattern, entry.cover).map_err(io_error)?;
    }
    out.flush().map_err(io_error)?;
    tracing::debug!(path = %path.display(), lines = covers.len(), "results written");
    Ok(())
}

/// Serialize `value` as JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let mut out = create(path)?;
    serde_json::to_writer(&mut out, value).map_err(|e| DatasetError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    out.flush().map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "json written");
    Ok(())
}
