//! Prompt text sent to the prescription-generating LLM.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the extraction pipeline in
//!    [`crate::pipeline`] is written against the section labels this
//!    template requests, so template and extractor evolve in one place.
//!
//! 2. **Testability** — unit tests can inspect the rendered prompts
//!    directly without talking to a real model.
//!
//! This crate does not call the model itself; callers render these prompts,
//! obtain a response through whatever client they use, and hand the raw
//! text to [`crate::extract`].

/// Template for the final prescription request.
///
/// The placeholders `{name}`, `{age}`, `{gender}` and `{date}` are filled
/// by [`prescription_prompt`]. The requested labels match the section
/// headers the extractor recognises.
pub const PRESCRIPTION_TEMPLATE: &str = r#"Based on the information above, generate a complete medical prescription in the following format. Be professional, use generic medication names when possible, and ensure it's understandable by pharmacists.

---
**Medical Prescription**

**Patient Information**: {name}, {age} years old, Gender: {gender}
**Date**: {date}

**Diagnosis**: [Insert accurate diagnosis based on previous discussion]

**Medication**:
- **Name**: [Generic Name] (Brand Name)
- **Dosage and Route**: [e.g., 500mg orally]
- **Frequency and Duration**: [e.g., Twice a day for 5 days]
- **Refills**: [e.g., None / 1 refill]
- **Special Instructions**: [e.g., Take with food, avoid alcohol]

**Non-Pharmacological Recommendations**

**Medical Tests Recommended**

**Prescriber**: Dr. AI Medic. MD
---"#;

/// Render the prescription request for one patient.
pub fn prescription_prompt(name: &str, age: u32, gender: &str, date: &str) -> String {
    PRESCRIPTION_TEMPLATE
        .replace("{name}", name)
        .replace("{age}", &age.to_string())
        .replace("{gender}", gender)
        .replace("{date}", date)
}

/// Build the context message carrying reconstructed OCR text from a
/// medical test report.
///
/// Sent as an extra user message ahead of the prescription request so the
/// model can weigh the report's findings.
pub fn ocr_context_message(ocr_text: &str) -> String {
    format!(
        "This is the OCR output of the uploaded medical test report. Please consider this \
         information while generating the prescription. The OCR output is as follows:\n\n{}",
        ocr_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescription_prompt_fills_all_placeholders() {
        let prompt = prescription_prompt("John Doe", 30, "Male", "July 1, 2025");
        assert!(prompt.contains("**Patient Information**: John Doe, 30 years old, Gender: Male"));
        assert!(prompt.contains("**Date**: July 1, 2025"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn template_requests_every_extracted_section() {
        for label in [
            "**Patient Information**",
            "**Date**",
            "**Diagnosis**",
            "**Medication**",
            "**Non-Pharmacological Recommendations**",
            "**Medical Tests Recommended**",
            "**Prescriber**",
        ] {
            assert!(
                PRESCRIPTION_TEMPLATE.contains(label),
                "template is missing {label}"
            );
        }
    }

    #[test]
    fn ocr_context_embeds_the_text() {
        let msg = ocr_context_message("Hemoglobin 13.5");
        assert!(msg.ends_with("Hemoglobin 13.5"));
        assert!(msg.contains("medical test report"));
    }
}
