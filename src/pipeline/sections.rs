//! Section splitting: carve the raw LLM text into per-section body spans.
//!
//! The prescription text is requested in a fixed template, but the model
//! varies emphasis markers, colons and spacing. Headers are therefore
//! matched case-insensitively with tolerant emphasis (`*X*`, `**X**`,
//! `__X__`) and an optional trailing colon. A completely unemphasised
//! header word is *not* treated as a boundary — "medication" appears in
//! running prose far too often.
//!
//! A section's body runs from just after its header match to the earliest
//! subsequent match of one of its terminators. Field labels inside a body
//! (e.g. `**Name**:` inside the medication section) must not terminate it,
//! which is why the three block sections carry explicit terminator lists
//! rather than stopping at any bold label.

use once_cell::sync::Lazy;
use regex::Regex;

/// The recognised section headers of a prescription document.
///
/// `FollowUp` only ever serves as a boundary for the sections before it;
/// it has no extracted content of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    PatientInformation,
    Date,
    Diagnosis,
    Medication,
    NonPharmacologicalRecommendations,
    MedicalTestsRecommended,
    FollowUp,
    Prescriber,
}

/// Where a section's body ends.
enum Terminator {
    /// Earliest match of any of these section headers.
    Headers(&'static [SectionKind]),
    /// Next bolded `**Label**:` of any kind.
    NextBoldLabel,
    /// End of the first non-empty line.
    LineEnd,
}

fn header_re(label: &str) -> Regex {
    // Tolerant of *X*, **X**, __X__ emphasis and an optional colon.
    Regex::new(&format!(r"(?i)[*_]{{1,2}}\s*{label}\s*[*_]{{1,2}}\s*:?")).unwrap()
}

static RE_H_PATIENT: Lazy<Regex> = Lazy::new(|| header_re("Patient Information"));
static RE_H_DATE: Lazy<Regex> = Lazy::new(|| header_re("Date"));
static RE_H_DIAGNOSIS: Lazy<Regex> = Lazy::new(|| header_re("Diagnosis"));
static RE_H_MEDICATION: Lazy<Regex> = Lazy::new(|| header_re("Medication"));
static RE_H_NON_PHARM: Lazy<Regex> =
    Lazy::new(|| header_re("Non-Pharmacological Recommendations"));
static RE_H_TESTS: Lazy<Regex> = Lazy::new(|| header_re("Medical Tests Recommended"));
static RE_H_FOLLOW_UP: Lazy<Regex> = Lazy::new(|| header_re("Follow-Up"));
static RE_H_PRESCRIBER: Lazy<Regex> = Lazy::new(|| header_re("Prescriber"));

/// Any bolded label followed by a colon, e.g. `**Diagnosis**:`. Used as the
/// generic terminator for single-value sections. Requires a word character
/// right after the emphasis so list bullets (`* item`) do not match.
static RE_BOLD_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*_]{1,2}[A-Za-z][A-Za-z\s-]*[*_]{1,2}\s*:").unwrap());

impl SectionKind {
    fn header_regex(self) -> &'static Regex {
        match self {
            SectionKind::PatientInformation => &RE_H_PATIENT,
            SectionKind::Date => &RE_H_DATE,
            SectionKind::Diagnosis => &RE_H_DIAGNOSIS,
            SectionKind::Medication => &RE_H_MEDICATION,
            SectionKind::NonPharmacologicalRecommendations => &RE_H_NON_PHARM,
            SectionKind::MedicalTestsRecommended => &RE_H_TESTS,
            SectionKind::FollowUp => &RE_H_FOLLOW_UP,
            SectionKind::Prescriber => &RE_H_PRESCRIBER,
        }
    }

    fn terminator(self) -> Terminator {
        use SectionKind::*;
        match self {
            Medication => Terminator::Headers(&[
                NonPharmacologicalRecommendations,
                MedicalTestsRecommended,
                FollowUp,
                Prescriber,
            ]),
            NonPharmacologicalRecommendations => {
                Terminator::Headers(&[MedicalTestsRecommended, FollowUp, Prescriber])
            }
            MedicalTestsRecommended => Terminator::Headers(&[FollowUp, Prescriber]),
            Prescriber => Terminator::LineEnd,
            PatientInformation | Date | Diagnosis | FollowUp => Terminator::NextBoldLabel,
        }
    }
}

/// The body span of `kind` within `text`, or `None` when its header is
/// absent. The span is untrimmed; callers trim or tokenize as appropriate.
pub fn section_body(text: &str, kind: SectionKind) -> Option<&str> {
    let header = kind.header_regex().find(text)?;
    let rest = &text[header.end()..];

    let end = match kind.terminator() {
        Terminator::Headers(kinds) => kinds
            .iter()
            .filter_map(|k| k.header_regex().find(rest).map(|m| m.start()))
            .min()
            .unwrap_or(rest.len()),
        Terminator::NextBoldLabel => RE_BOLD_LABEL
            .find(rest)
            .map(|m| m.start())
            .unwrap_or(rest.len()),
        Terminator::LineEnd => {
            let body = rest.trim_start();
            return Some(body.split('\n').next().unwrap_or(body));
        }
    };

    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "**Medical Prescription**\n\n\
        **Patient Information**: Sara, 25 years old, Gender: Female\n\
        **Date**: July 1, 2025\n\n\
        **Diagnosis**: Acute bronchitis\n\n\
        **Medication**:\n\
        - **Name**: Amoxicillin\n\
        - **Dosage and Route**: 500mg orally\n\n\
        **Non-Pharmacological Recommendations**\n\
        - Rest for 3 days\n\n\
        **Medical Tests Recommended**\n\
        - CBC\n\n\
        **Prescriber**: Dr. AI Medic. MD\n";

    #[test]
    fn medication_body_stops_at_recommendations() {
        let body = section_body(DOC, SectionKind::Medication).unwrap();
        assert!(body.contains("Amoxicillin"));
        assert!(body.contains("500mg orally"));
        assert!(!body.contains("Rest for 3 days"));
    }

    #[test]
    fn field_labels_do_not_terminate_medication() {
        let body = section_body(DOC, SectionKind::Medication).unwrap();
        assert!(body.contains("**Name**"));
        assert!(body.contains("**Dosage and Route**"));
    }

    #[test]
    fn recommendations_body_stops_at_tests() {
        let body = section_body(DOC, SectionKind::NonPharmacologicalRecommendations).unwrap();
        assert!(body.contains("Rest for 3 days"));
        assert!(!body.contains("CBC"));
    }

    #[test]
    fn tests_body_stops_at_prescriber() {
        let body = section_body(DOC, SectionKind::MedicalTestsRecommended).unwrap();
        assert!(body.contains("CBC"));
        assert!(!body.contains("Dr. AI Medic"));
    }

    #[test]
    fn diagnosis_stops_at_next_bold_label() {
        let body = section_body(DOC, SectionKind::Diagnosis).unwrap();
        assert_eq!(body.trim(), "Acute bronchitis");
    }

    #[test]
    fn date_stops_at_next_bold_label() {
        let body = section_body(DOC, SectionKind::Date).unwrap();
        assert_eq!(body.trim(), "July 1, 2025");
    }

    #[test]
    fn prescriber_is_first_line_only() {
        let body = section_body(DOC, SectionKind::Prescriber).unwrap();
        assert_eq!(body, "Dr. AI Medic. MD");
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(section_body("no sections here", SectionKind::Medication).is_none());
    }

    #[test]
    fn headers_match_case_insensitively() {
        let text = "**MEDICATION**: stuff **Prescriber**: Dr. X";
        let body = section_body(text, SectionKind::Medication).unwrap();
        assert_eq!(body.trim(), "stuff");
    }

    #[test]
    fn single_asterisk_and_underscore_emphasis_accepted() {
        let starred = "*Diagnosis*: flu\n**Medication**: none";
        assert_eq!(
            section_body(starred, SectionKind::Diagnosis).unwrap().trim(),
            "flu"
        );
        let underscored = "__Diagnosis__: flu\n**Medication**: none";
        assert_eq!(
            section_body(underscored, SectionKind::Diagnosis)
                .unwrap()
                .trim(),
            "flu"
        );
    }

    #[test]
    fn unemphasised_word_is_not_a_header() {
        assert!(section_body("the medication helped", SectionKind::Medication).is_none());
    }

    #[test]
    fn medication_runs_to_end_without_later_sections() {
        let text = "**Medication**:\n- **Name**: Ibuprofen";
        let body = section_body(text, SectionKind::Medication).unwrap();
        assert!(body.contains("Ibuprofen"));
    }

    #[test]
    fn follow_up_terminates_medication() {
        let text = "**Medication**: none prescribed\n**Follow-Up**: in 2 weeks";
        let body = section_body(text, SectionKind::Medication).unwrap();
        assert!(!body.contains("weeks"));
    }
}
