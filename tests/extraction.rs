//! End-to-end integration tests for scan2rx.
//!
//! These exercise the full pipeline from OCR detection JSON through line
//! reconstruction, and from a realistic LLM prescription response through
//! record extraction and file round trips. No network, no model calls —
//! everything runs on in-repo fixtures.

use pretty_assertions::assert_eq;
use scan2rx::{
    extract, extract_from_file, parse_detections, reconstruct, reconstruct_from_file,
    write_record, BBox, Detection, LayoutConfig, PrescriptionRecord, Scan2RxError,
};

// ── Fixtures ─────────────────────────────────────────────────────────────

/// A well-formed response following the requested prescription template.
const FULL_RESPONSE: &str = "\
---
**Medical Prescription**

**Patient Information**: Anna Marie Smith, 25 years old, Gender: Female
**Date**: July 1, 2025

**Diagnosis**: Acute bacterial sinusitis

**Medication**:
1. **Name**: Amoxicillin (Amoxil)
- **Dosage and Route**: 500mg orally
- **Frequency and Duration**: Three times a day for 7 days
- **Refills**: None
- **Special Instructions**: Take with food

2. **Name**: Paracetamol (Panadol)
- **Dosage and Route**: 500mg orally
- **Frequency and Duration**: As needed, max 4 doses/day
- **Refills**: 1 refill
- **Special Instructions or Warnings**: Avoid alcohol

**Non-Pharmacological Recommendations**:
- **Hydration**: Drink at least 2L of water daily
- **Rest**: Sleep 8 hours per night
- Steam inhalation twice a day

**Medical Tests Recommended**:
1. **CBC**: Complete blood count to rule out systemic infection
2. Sinus X-ray if symptoms persist beyond 10 days

**Prescriber**: Dr. AI Medic. MD
---
";

fn detection(text: &str, x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Detection {
    Detection::new(
        text,
        BBox {
            x_min,
            y_min,
            x_max,
            y_max,
        },
    )
}

// ── Full-document extraction ─────────────────────────────────────────────

#[test]
fn full_response_extracts_every_section() {
    let record = extract(FULL_RESPONSE);

    assert_eq!(record.patient_info.name, "Anna Marie Smith");
    assert_eq!(record.patient_info.age, 25);
    assert_eq!(record.patient_info.gender, "Female");
    assert_eq!(record.patient_info.date, "July 1, 2025");
    assert_eq!(record.diagnosis, "Acute bacterial sinusitis");

    assert_eq!(record.medications.len(), 2);
    let amox = &record.medications[0];
    assert_eq!(amox.name, "Amoxicillin (Amoxil)");
    assert_eq!(amox.dosage_and_route, "500mg orally");
    assert_eq!(amox.frequency_and_duration, "Three times a day for 7 days");
    assert_eq!(amox.refills, "None");
    assert_eq!(amox.special_instructions, "Take with food");
    let para = &record.medications[1];
    assert_eq!(para.name, "Paracetamol (Panadol)");
    assert_eq!(para.special_instructions, "Avoid alcohol");

    assert_eq!(record.non_pharmacological_recommendations.len(), 3);
    assert_eq!(record.non_pharmacological_recommendations[0].title, "Hydration");
    assert_eq!(
        record.non_pharmacological_recommendations[0].details.text,
        "Drink at least 2L of water daily"
    );
    // Untitled entry repeats its content as the title.
    assert_eq!(
        record.non_pharmacological_recommendations[2].title,
        "Steam inhalation twice a day"
    );

    assert_eq!(record.medical_tests.len(), 2);
    assert_eq!(record.medical_tests[0].test_name, "CBC");
    assert_eq!(
        record.medical_tests[1].details.text,
        "Sinus X-ray if symptoms persist beyond 10 days"
    );

    assert_eq!(record.prescriber.name, "Dr. AI Medic. MD");
}

#[test]
fn negation_overrides_well_formed_medication_entries() {
    let response = FULL_RESPONSE.replace(
        "**Medication**:\n1.",
        "**Medication**: Not applicable.\n1.",
    );
    let record = extract(&response);
    assert!(record.medications.is_empty());
    // The rest of the document still extracts.
    assert_eq!(record.diagnosis, "Acute bacterial sinusitis");
    assert_eq!(record.medical_tests.len(), 2);
}

#[test]
fn collapsed_single_line_response_still_extracts() {
    let text = "**Medication**: 1. **Name**: Paracetamol **Dosage and Route**: 500mg orally \
                **Non-Pharmacological Recommendations**: - Rest";
    let record = extract(text);
    assert_eq!(record.medications.len(), 1);
    assert_eq!(record.medications[0].name, "Paracetamol");
    assert_eq!(record.medications[0].dosage_and_route, "500mg orally");
    assert_eq!(record.non_pharmacological_recommendations[0].title, "Rest");
}

#[test]
fn extraction_is_deterministic_across_runs() {
    let first = extract(FULL_RESPONSE);
    for _ in 0..3 {
        assert_eq!(extract(FULL_RESPONSE), first);
    }
}

#[test]
fn degraded_response_never_panics() {
    for text in [
        "",
        "   \n\n ",
        "**Medication**:",
        "**Patient Information**:",
        "1. **Name**:",
        "random prose with no labels at all",
        "**Medication**: **Medication**: **Medication**:",
    ] {
        let _ = extract(text);
    }
}

// ── JSON contract ────────────────────────────────────────────────────────

#[test]
fn serialised_record_uses_contract_keys() {
    let json = serde_json::to_value(extract(FULL_RESPONSE)).unwrap();
    let obj = json.as_object().unwrap();
    for key in [
        "patient_info",
        "diagnosis",
        "medications",
        "non_pharmacological_recommendations",
        "medical_tests",
        "prescriber",
    ] {
        assert!(obj.contains_key(key), "missing key {key}");
    }
    assert_eq!(json["patient_info"]["age"], 25);
    assert_eq!(json["medical_tests"][0]["test_name"], "CBC");
    assert_eq!(json["prescriber"]["name"], "Dr. AI Medic. MD");
}

#[test]
fn empty_record_serialises_to_empty_not_null() {
    let json = serde_json::to_value(PrescriptionRecord::default()).unwrap();
    assert_eq!(json["diagnosis"], "");
    assert!(json["medications"].as_array().unwrap().is_empty());
    assert_eq!(json["patient_info"]["age"], 0);
}

// ── Line reconstruction ──────────────────────────────────────────────────

#[test]
fn reconstruction_orders_a_scanned_form() {
    // Detections deliberately shuffled, with wobbling baselines.
    let detections = vec![
        detection("13.5", 210.0, 61.0, 250.0, 75.0),
        detection("Patient:", 10.0, 10.0, 90.0, 24.0),
        detection("Hemoglobin", 10.0, 60.0, 120.0, 74.0),
        detection("John Doe", 100.0, 11.0, 180.0, 25.0),
        detection("g/dL", 260.0, 62.0, 300.0, 76.0),
    ];
    let doc = reconstruct(&detections, &LayoutConfig::default()).unwrap();
    assert_eq!(doc.lines.len(), 2);
    assert_eq!(doc.lines[0], "Patient: John Doe");
    assert!(doc.lines[1].starts_with("Hemoglobin"));
    assert!(doc.lines[1].contains("13.5"));
    assert!(doc.lines[1].ends_with("g/dL"));
}

#[test]
fn wide_gaps_become_multiple_spaces() {
    let detections = vec![
        detection("Result", 0.0, 0.0, 50.0, 12.0),
        detection("Normal", 120.0, 0.0, 170.0, 12.0),
    ];
    let doc = reconstruct(&detections, &LayoutConfig::default()).unwrap();
    // gap = 120 - 50 = 70px → 7 spaces
    assert_eq!(doc.lines[0], format!("Result{}Normal", " ".repeat(7)));
}

#[test]
fn empty_detection_set_is_rejected() {
    let err = reconstruct(&[], &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, Scan2RxError::EmptyDetections));
}

// ── File round trips ─────────────────────────────────────────────────────

#[test]
fn detection_file_reconstructs_end_to_end() {
    let json = r#"{
        "rec_texts": ["30", "Name:", "John", "Age:"],
        "rec_boxes": [
            [45.0, 22.0, 60.0, 32.0],
            [0.0, 0.0, 40.0, 10.0],
            [45.0, 1.0, 70.0, 11.0],
            [0.0, 21.0, 40.0, 31.0]
        ]
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("large_res.json");
    std::fs::write(&path, json).unwrap();

    let doc = reconstruct_from_file(&path, &LayoutConfig::default()).unwrap();
    assert_eq!(doc.lines, vec!["Name: John", "Age: 30"]);
    assert_eq!(doc.text(), "Name: John\nAge: 30\n");
}

#[test]
fn mismatched_arrays_are_rejected_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"rec_texts": ["a", "b"], "rec_boxes": [[0,0,1,1]]}"#).unwrap();

    let err = reconstruct_from_file(&path, &LayoutConfig::default()).unwrap_err();
    match err {
        Scan2RxError::InvalidDetectionFile { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected InvalidDetectionFile, got {other:?}"),
    }
}

#[test]
fn missing_detection_file_is_reported() {
    let err =
        reconstruct_from_file("/no/such/file.json", &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, Scan2RxError::DetectionFileNotFound { .. }));
}

#[test]
fn response_file_to_record_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let response_path = dir.path().join("response.txt");
    let record_path = dir.path().join("prescription.json");
    std::fs::write(&response_path, FULL_RESPONSE).unwrap();

    let record = extract_from_file(&response_path).unwrap();
    write_record(&record, &record_path, true).unwrap();

    let back: PrescriptionRecord =
        serde_json::from_str(&std::fs::read_to_string(&record_path).unwrap()).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.medications.len(), 2);
}

#[test]
fn parsed_detections_preserve_input_order() {
    let json = r#"{
        "rec_texts": ["b", "a"],
        "rec_boxes": [[0, 0, 10, 10], [20, 0, 30, 10]]
    }"#;
    let detections = parse_detections(json).unwrap();
    assert_eq!(detections[0].text, "b");
    assert_eq!(detections[1].text, "a");
}
