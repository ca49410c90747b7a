//! Pipeline stages for prescription digitisation.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets the section
//! splitter and field tokenizer be shared across every record section
//! instead of duplicating label-matching logic per field.
//!
//! ## Data Flow
//!
//! ```text
//! detections ──▶ layout ──▶ text ──▶ [external LLM] ──▶ sections ──▶ fields ──▶ extract
//! (OCR boxes)  (row grouping)                         (body spans)  (labels)   (record)
//! ```
//!
//! 1. [`layout`]   — cluster spatially-positioned detections into rows and
//!    serialise them as reading-order text; the only fallible stage
//! 2. [`sections`] — locate each recognised header and carve the raw LLM
//!    text into per-section body spans
//! 3. [`fields`]   — match one bolded label inside a body span; reused by
//!    medications, recommendations, tests and the patient header
//! 4. [`extract`]  — assemble the typed [`crate::PrescriptionRecord`],
//!    degrading every missing piece to its documented default

pub mod extract;
pub mod fields;
pub mod layout;
pub mod sections;
