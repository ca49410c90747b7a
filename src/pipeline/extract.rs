//! Record assembly: turn raw LLM prescription text into a typed
//! [`PrescriptionRecord`].
//!
//! ## Why so tolerant?
//!
//! The upstream text is machine-generated against a requested template, but
//! nothing guarantees the model honours it — numbering styles drift, labels
//! lose their colons, whole sections vanish. Extraction therefore never
//! aborts: each field and section is attempted independently, and any piece
//! that fails to match degrades to its documented default. A failure in one
//! section must never prevent extraction of the rest.
//!
//! The one deliberate override: a negation phrase anywhere in the raw
//! medication section ("not applicable", "no medication prescribed") forces
//! an empty medication list even when well-formed entries sit beside it —
//! the model sometimes emits both, and the negation wins.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::pipeline::fields::{self, labeled_field};
use crate::pipeline::sections::{section_body, SectionKind};
use crate::record::{
    Details, MedicalTest, Medication, PatientInfo, Prescriber, PrescriptionRecord, Recommendation,
};

/// Phrases that force an empty medication list, matched case-insensitively
/// anywhere in the raw medication section.
const NEGATION_PHRASES: [&str; 2] = ["not applicable", "no medication prescribed"];

// ── Medication field matchers ────────────────────────────────────────────

static RE_F_NAME: Lazy<Regex> = Lazy::new(|| fields::label_regex("Name"));
static RE_F_DOSAGE: Lazy<Regex> = Lazy::new(|| fields::label_regex("Dosage and Route"));
static RE_F_FREQUENCY: Lazy<Regex> = Lazy::new(|| fields::label_regex("Frequency and Duration"));
static RE_F_REFILLS: Lazy<Regex> = Lazy::new(|| fields::label_regex("Refills"));
static RE_F_INSTRUCTIONS: Lazy<Regex> =
    Lazy::new(|| fields::label_regex("Special Instructions(?: or Warnings)?"));

/// A bulleted or numbered boundary immediately preceding a `**Name**:`
/// marker; the marker itself is captured so the split can keep it at the
/// start of the following block.
static RE_MED_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\n|^)\s*(?:\d+[.)]|-|\*)\s*(\*\*[ \t]*Name[ \t]*\*\*[ \t]*:)").unwrap()
});

/// A Name label at the very start of a block (any tolerated emphasis).
static RE_NAME_AT_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[*_]{1,2}[ \t]*Name[ \t]*[*_]{1,2}[ \t]*:").unwrap());

/// Leftover numbering at the start of an extracted name (`1. `, `2) `).
static RE_LEADING_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

// ── List-section and patient-header matchers ─────────────────────────────

/// One list line: mandatory bullet/number marker, optional bolded
/// sub-title, remainder.
static RE_LIST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+[.)]|-|\*)\s*(?:[*_]{1,2}(.+?)[*_]{1,2}[ \t]*:)?\s*(.+)").unwrap()
});

static RE_PATIENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[*_]{1,2}[ \t]*Patient Information[ \t]*[*_]{1,2}[ \t]*:[ \t]*([\w ]+),")
        .unwrap()
});

static RE_AGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*years?\s+old").unwrap());

static RE_GENDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Gender[ \t]*:[ \t]*([A-Za-z]+)").unwrap());

/// Extract a structured prescription record from raw LLM text.
///
/// Total function: malformed input yields a record full of defaults, never
/// an error. Identical input always yields an identical record.
pub fn extract(raw_text: &str) -> PrescriptionRecord {
    let patient_info = extract_patient_info(raw_text);

    let diagnosis = section_body(raw_text, SectionKind::Diagnosis)
        .map(|body| body.trim().to_string())
        .unwrap_or_default();

    let medications = section_body(raw_text, SectionKind::Medication)
        .map(extract_medications)
        .unwrap_or_default();

    let non_pharmacological_recommendations: Vec<Recommendation> =
        section_body(raw_text, SectionKind::NonPharmacologicalRecommendations)
            .map(|body| {
                list_entries(body)
                    .into_iter()
                    .map(|(title, text)| Recommendation {
                        title,
                        details: Details { text },
                    })
                    .collect()
            })
            .unwrap_or_default();

    let medical_tests: Vec<MedicalTest> = section_body(raw_text, SectionKind::MedicalTestsRecommended)
        .map(|body| {
            list_entries(body)
                .into_iter()
                .map(|(test_name, text)| MedicalTest {
                    test_name,
                    details: Details { text },
                })
                .collect()
        })
        .unwrap_or_default();

    let prescriber = Prescriber {
        name: extract_prescriber(raw_text),
    };

    debug!(
        medications = medications.len(),
        recommendations = non_pharmacological_recommendations.len(),
        tests = medical_tests.len(),
        "extracted prescription record"
    );

    PrescriptionRecord {
        patient_info,
        diagnosis,
        medications,
        non_pharmacological_recommendations,
        medical_tests,
        prescriber,
    }
}

/// Parse the patient header line plus the date section.
fn extract_patient_info(text: &str) -> PatientInfo {
    let name = RE_PATIENT_NAME
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    // A missing or non-numeric age resolves to 0, never an error.
    let age = RE_AGE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0);

    let gender = RE_GENDER
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let date = section_body(text, SectionKind::Date)
        .map(|body| body.trim().to_string())
        .unwrap_or_default();

    PatientInfo {
        name,
        age,
        gender,
        date,
    }
}

/// Parse the medication section body into entries, honouring the negation
/// override.
fn extract_medications(section: &str) -> Vec<Medication> {
    let lower = section.to_lowercase();
    if section.trim().is_empty() || NEGATION_PHRASES.iter().any(|p| lower.contains(p)) {
        debug!("medication section empty or negated");
        return Vec::new();
    }

    split_medication_blocks(section.trim())
        .iter()
        .map(|block| medication_from_block(block))
        .collect()
}

/// Split a medication section into per-entry blocks at bulleted `**Name**:`
/// boundaries.
///
/// The `regex` crate has no lookahead, so instead of a zero-width split the
/// boundary match captures the Name marker and the text is cut so that the
/// marker starts the next block while the bullet itself is dropped —
/// exactly the spans a lookahead split would produce.
fn split_medication_blocks(section: &str) -> Vec<String> {
    // (boundary start, Name-marker start) per match.
    let mut cuts: Vec<(usize, usize)> = Vec::new();
    for caps in RE_MED_BOUNDARY.captures_iter(section) {
        if let (Some(whole), Some(marker)) = (caps.get(0), caps.get(1)) {
            cuts.push((whole.start(), marker.start()));
        }
    }

    if cuts.is_empty() {
        return vec![section.to_string()];
    }

    let mut blocks = Vec::with_capacity(cuts.len() + 1);
    let head = section[..cuts[0].0].trim();
    if !head.is_empty() {
        blocks.push(head.to_string());
    }
    for (i, &(_, marker_start)) in cuts.iter().enumerate() {
        let end = cuts
            .get(i + 1)
            .map(|&(boundary, _)| boundary)
            .unwrap_or(section.len());
        let block = section[marker_start..end].trim();
        if !block.is_empty() {
            blocks.push(block.to_string());
        }
    }
    blocks
}

/// Extract one medication entry from a block.
fn medication_from_block(block: &str) -> Medication {
    // A block without an explicit Name label treats its leading content as
    // the name value.
    let synthesised;
    let block = if RE_NAME_AT_START.is_match(block) {
        block
    } else {
        synthesised = format!("**Name**: {block}");
        synthesised.as_str()
    };

    let raw_name = labeled_field(&RE_F_NAME, block).into_string();
    let name = RE_LEADING_NUM.replace(&raw_name, "").trim().to_string();

    Medication {
        name,
        brand_names: Vec::new(),
        dosage_and_route: labeled_field(&RE_F_DOSAGE, block).into_string(),
        frequency_and_duration: labeled_field(&RE_F_FREQUENCY, block).into_string(),
        refills: labeled_field(&RE_F_REFILLS, block).into_string(),
        special_instructions: labeled_field(&RE_F_INSTRUCTIONS, block).into_string(),
    }
}

/// Parse a list-style section body into `(title, detail)` pairs.
///
/// Each non-empty line needs a leading bullet/number marker; an optional
/// bolded sub-title becomes the title, otherwise the whole remainder serves
/// as both title and detail. Lines without a marker are dropped.
fn list_entries(section: &str) -> Vec<(String, String)> {
    section
        .trim()
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            RE_LIST_LINE.captures(line).map(|caps| {
                let detail = caps[2].trim().to_string();
                let title = caps
                    .get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_else(|| detail.clone());
                (title, detail)
            })
        })
        .collect()
}

/// The prescriber line, trailing separator dashes stripped.
fn extract_prescriber(text: &str) -> String {
    section_body(text, SectionKind::Prescriber)
        .map(|body| body.trim().trim_end_matches('-').trim().to_string())
        .unwrap_or_default()
}
