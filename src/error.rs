//! Error types for the scan2rx library.
//!
//! The crate draws a hard line between two failure modes:
//!
//! * [`Scan2RxError`] — **Fatal**: the operation cannot proceed at all
//!   (empty detection set, unreadable detection file, malformed OCR JSON,
//!   bad configuration). Returned as `Err(Scan2RxError)` from the layout
//!   and file-handling entry points.
//!
//! * **Soft degradation** — not an error type at all. The prescription
//!   extractor never fails: a missing section, absent field, non-numeric
//!   age or unmatched list line resolves to its documented default (empty
//!   string, empty list, zero). The upstream text is machine-generated and
//!   its formatting is not guaranteed, so [`crate::extract`] is a total
//!   function and returns a plain [`crate::PrescriptionRecord`].
//!
//! The negation phrase in a medication section ("no medication prescribed")
//! is a business rule, not an error — it forces an empty medication list.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the scan2rx library.
///
/// Extraction-side degradation never appears here; see the module docs.
#[derive(Debug, Error)]
pub enum Scan2RxError {
    // ── Layout errors ─────────────────────────────────────────────────────
    /// Line reconstruction was called with no detections.
    ///
    /// Row grouping seeds the first row from the first detection, so an
    /// empty input has no defined result and is rejected up front.
    #[error(
        "No OCR detections to reconstruct: the detection list is empty.\n\
         Check that the OCR engine produced output for this image."
    )]
    EmptyDetections,

    // ── Detection-file errors ─────────────────────────────────────────────
    /// Detection file was not found at the given path.
    #[error("Detection file not found: '{path}'\nCheck the path exists and is readable.")]
    DetectionFileNotFound { path: PathBuf },

    /// Process does not have read permission on the detection file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The detection file exists and was read, but its content is not
    /// usable OCR output.
    #[error(
        "Invalid detection file '{path}': {detail}\n\
         Expected OCR result JSON with parallel `rec_texts` and `rec_boxes` arrays."
    )]
    InvalidDetectionFile { path: PathBuf, detail: String },

    /// Detection JSON parsed from memory is not usable OCR output.
    #[error("Invalid detection JSON: {detail}")]
    InvalidDetections { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not read an input text file.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
