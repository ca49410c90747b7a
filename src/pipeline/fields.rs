//! Labeled-field tokenizer: match one `**Label**: value` pair inside a
//! section body.
//!
//! Every record section uses the same label grammar, so one tokenizer
//! serves medications, the patient header and the prescriber line alike.
//! A value capture ends at the first line break, the next bolded label on
//! the same line, or end of text — single-line prescriptions (everything
//! the model emits on one line) still split into their individual fields.
//!
//! [`FieldValue`] keeps "label absent" distinguishable from "label present
//! with empty value"; both resolve to an empty string via
//! [`FieldValue::into_string`], which is what the record defaults require.

use regex::Regex;

/// Result of tokenizing a single labeled field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The label matched; the trimmed value may still be empty.
    Present(String),
    /// The label did not appear in the body.
    Missing,
}

impl FieldValue {
    pub fn is_present(&self) -> bool {
        matches!(self, FieldValue::Present(_))
    }

    /// Resolve to the documented default: the value when present, an empty
    /// string otherwise.
    pub fn into_string(self) -> String {
        match self {
            FieldValue::Present(s) => s,
            FieldValue::Missing => String::new(),
        }
    }
}

/// Compile the matcher for a bolded `label` followed by a colon.
///
/// `label` is a regex fragment, so alternate spellings can be passed as
/// alternations (e.g. `Special Instructions(?: or Warnings)?`). Callers
/// keep the compiled regex in a `Lazy` static; labels are fixed at compile
/// time, never user input.
pub fn label_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)[*_]{{1,2}}[ \t]*(?:{label})[ \t]*[*_]{{1,2}}[ \t]*:[ \t]*(.+?)(?:\n|[*_]{{2}}|$)"
    ))
    .unwrap()
}

/// Tokenize one labeled field from `body`, trimming the captured value.
pub fn labeled_field(re: &Regex, body: &str) -> FieldValue {
    match re.captures(body) {
        Some(caps) => FieldValue::Present(caps[1].trim().to_string()),
        None => FieldValue::Missing,
    }
}
