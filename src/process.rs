//! File-level entry points tying the pipeline stages to disk.
//!
//! These helpers are what the CLI calls: load OCR output from a detection
//! file, reconstruct lines, extract a record from an LLM response file,
//! and write results back out. Library users who already hold data in
//! memory can call the in-memory functions in [`crate::pipeline`] directly.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::detection::load_detections;
use crate::error::Scan2RxError;
use crate::pipeline::extract::extract;
use crate::pipeline::layout::{reconstruct, ReconstructedDocument};
use crate::record::PrescriptionRecord;

/// Load an OCR detection file and reconstruct its text lines.
///
/// # Errors
/// Fails if the file is missing, unreadable or malformed, or if it holds
/// no detections.
pub fn reconstruct_from_file(
    path: impl AsRef<Path>,
    config: &LayoutConfig,
) -> Result<ReconstructedDocument, Scan2RxError> {
    let path = path.as_ref();
    info!("Reconstructing lines from {}", path.display());

    let detections = load_detections(path)?;
    debug!("Loaded {} detections", detections.len());

    let document = reconstruct(&detections, config)?;
    info!("Reconstructed {} lines", document.len());
    Ok(document)
}

/// Read an LLM response from a text file and extract a prescription record.
///
/// # Errors
/// Fails only if the file cannot be read; extraction itself never fails.
pub fn extract_from_file(path: impl AsRef<Path>) -> Result<PrescriptionRecord, Scan2RxError> {
    let path = path.as_ref();
    info!("Extracting prescription record from {}", path.display());

    let raw_text = fs::read_to_string(path).map_err(|source| Scan2RxError::InputReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(extract(&raw_text))
}

/// Serialise a record to a JSON file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub fn write_record(
    record: &PrescriptionRecord,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), Scan2RxError> {
    let json = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    }
    .map_err(|e| Scan2RxError::OutputWriteFailed {
        path: path.as_ref().to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    write_atomic(path.as_ref(), &json)
}

/// Write reconstructed text to a file, atomically.
pub fn write_text(document: &ReconstructedDocument, path: impl AsRef<Path>) -> Result<(), Scan2RxError> {
    write_atomic(path.as_ref(), &document.text())
}

// Atomic write: write to temp, then rename.
fn write_atomic(path: &Path, content: &str) -> Result<(), Scan2RxError> {
    let io_err = |source| Scan2RxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)?;

    info!("Wrote {}", path.display());
    Ok(())
}
