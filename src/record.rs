//! The structured prescription record handed to the document renderer.
//!
//! Field names and nesting are a binding contract: the external rendering
//! collaborator consumes the serialised JSON field-for-field, so renaming or
//! reshaping anything here breaks that consumer. Every field has an explicit
//! default (empty string, empty list, zero age) — the extractor fills in
//! defaults rather than omitting fields, and `Default` mirrors that.
//!
//! All types are plain immutable carriers: constructed once per extraction,
//! handed to the renderer, then discarded. No identity, no persistence.

use serde::{Deserialize, Serialize};

/// A complete extracted prescription.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrescriptionRecord {
    pub patient_info: PatientInfo,
    /// Possibly empty when the diagnosis section is absent.
    pub diagnosis: String,
    /// Source order preserved. Forced empty when the medication section
    /// carries a negation phrase, regardless of any other content there.
    pub medications: Vec<Medication>,
    pub non_pharmacological_recommendations: Vec<Recommendation>,
    pub medical_tests: Vec<MedicalTest>,
    pub prescriber: Prescriber,
}

/// Patient identity block from the header line of the prescription.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    /// Defaults to 0 when no "N years old" phrase is found; a missing or
    /// non-numeric age never fails extraction.
    pub age: u32,
    pub gender: String,
    pub date: String,
}

/// One prescribed medication entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    /// Always empty at extraction time; populated by a later enrichment
    /// step outside this crate.
    pub brand_names: Vec<String>,
    pub dosage_and_route: String,
    pub frequency_and_duration: String,
    pub refills: String,
    pub special_instructions: String,
}

/// A non-pharmacological recommendation line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub details: Details,
}

/// A recommended medical test line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MedicalTest {
    pub test_name: String,
    pub details: Details,
}

/// Free-text detail payload shared by recommendations and tests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Details {
    pub text: String,
}

/// The prescribing clinician.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prescriber {
    pub name: String,
}
