//! # scan2rx
//!
//! Reconstruct readable text from raw OCR detections and extract structured
//! prescription records from LLM-generated prescription text.
//!
//! ## Why this crate?
//!
//! OCR engines emit an unordered bag of `(text, bounding box)` detections —
//! fine for search, useless for reading. And the LLM that turns a medical
//! consultation into a prescription emits loosely formatted Markdown whose
//! labels and numbering drift from run to run. This crate bridges both gaps:
//! a geometric line reconstructor that orders detections the way a human
//! reads the page, and a tolerant extractor that turns the model's text into
//! one typed, serialisable record without ever failing.
//!
//! ## Pipeline Overview
//!
//! ```text
//! OCR JSON
//!  │
//!  ├─ 1. Load      parse rec_texts / rec_boxes into Detections
//!  ├─ 2. Layout    sort by centre-y, group rows by vertical overlap,
//!  │               order left-to-right, insert gap-proportional spaces
//!  ├─ 3. Prompt    render the context + prescription request
//!  │                     (model call happens outside this crate)
//!  ├─ 4. Sections  locate labelled section bodies in the response
//!  └─ 5. Extract   tokenise fields, assemble a PrescriptionRecord
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use scan2rx::{extract, reconstruct, Detection, BBox, LayoutConfig};
//!
//! # fn main() -> Result<(), scan2rx::Scan2RxError> {
//! let detections = vec![
//!     Detection::new("30", BBox { x_min: 45.0, y_min: 22.0, x_max: 60.0, y_max: 32.0 }),
//!     Detection::new("Name:", BBox { x_min: 0.0, y_min: 0.0, x_max: 40.0, y_max: 10.0 }),
//!     Detection::new("John", BBox { x_min: 45.0, y_min: 1.0, x_max: 70.0, y_max: 11.0 }),
//!     Detection::new("Age:", BBox { x_min: 0.0, y_min: 21.0, x_max: 40.0, y_max: 31.0 }),
//! ];
//! let document = reconstruct(&detections, &LayoutConfig::default())?;
//! assert_eq!(document.lines, vec!["Name: John", "Age: 30"]);
//!
//! let record = extract("**Diagnosis**: Migraine\n**Medication**:\n- **Name**: Sumatriptan\n");
//! assert_eq!(record.diagnosis, "Migraine");
//! assert_eq!(record.medications[0].name, "Sumatriptan");
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `scan2rx` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! scan2rx = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod detection;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod prompts;
pub mod record;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LayoutConfig, LayoutConfigBuilder};
pub use detection::{load_detections, parse_detections, BBox, Detection};
pub use error::Scan2RxError;
pub use pipeline::extract::extract;
pub use pipeline::layout::{reconstruct, ReconstructedDocument};
pub use process::{extract_from_file, reconstruct_from_file, write_record, write_text};
pub use record::{
    Details, MedicalTest, Medication, PatientInfo, Prescriber, PrescriptionRecord, Recommendation,
};
