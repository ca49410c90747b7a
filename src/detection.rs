//! OCR detection types and detection-file loading.
//!
//! A [`Detection`] is one recognised text span with its axis-aligned
//! bounding box in image coordinates (origin top-left, y increasing
//! downward). The OCR engine is an external collaborator; this crate makes
//! no assumption about the order in which it emits detections.
//!
//! The engine's saved result file is JSON with two parallel arrays:
//! `rec_texts` (recognised strings) and `rec_boxes`
//! (`[x_min, y_min, x_max, y_max]` per detection). [`load_detections`]
//! reads that file and pairs the arrays into typed detections, validating
//! existence, readability, JSON shape, and equal array lengths so callers
//! get a meaningful error rather than a silent truncation.

use crate::error::Scan2RxError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Axis-aligned bounding box in image coordinates, y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Vertical midpoint, the primary sort key for reading order.
    pub fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }

    /// Length of the vertical interval shared with `other`.
    ///
    /// Negative when the boxes do not overlap vertically; callers compare
    /// the raw value against a threshold, so no clamping here.
    pub fn vertical_overlap(&self, other: &BBox) -> f32 {
        self.y_max.min(other.y_max) - self.y_min.max(other.y_min)
    }
}

/// One OCR-recognised text span with its bounding box. Immutable, produced
/// externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub text: String,
    pub bbox: BBox,
}

impl Detection {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// Raw shape of the OCR engine's saved result file.
#[derive(Deserialize)]
struct OcrResultFile {
    rec_texts: Vec<String>,
    rec_boxes: Vec<[f32; 4]>,
}

/// Parse OCR result JSON (in memory) into detections.
///
/// Accepts the engine's native shape: parallel `rec_texts` / `rec_boxes`
/// arrays of equal length.
pub fn parse_detections(json: &str) -> Result<Vec<Detection>, Scan2RxError> {
    let raw: OcrResultFile =
        serde_json::from_str(json).map_err(|e| Scan2RxError::InvalidDetections {
            detail: e.to_string(),
        })?;

    if raw.rec_texts.len() != raw.rec_boxes.len() {
        return Err(Scan2RxError::InvalidDetections {
            detail: format!(
                "rec_texts has {} entries but rec_boxes has {}",
                raw.rec_texts.len(),
                raw.rec_boxes.len()
            ),
        });
    }

    let detections: Vec<Detection> = raw
        .rec_texts
        .into_iter()
        .zip(raw.rec_boxes)
        .map(|(text, [x_min, y_min, x_max, y_max])| {
            Detection::new(text, BBox::new(x_min, y_min, x_max, y_max))
        })
        .collect();

    debug!("Parsed {} detections", detections.len());
    Ok(detections)
}

/// Load detections from an OCR result file on disk.
///
/// Validates the path exists and is readable before parsing, mapping each
/// failure to a specific error variant.
pub fn load_detections(path: impl AsRef<Path>) -> Result<Vec<Detection>, Scan2RxError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Scan2RxError::DetectionFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let json = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Scan2RxError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Scan2RxError::DetectionFileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    parse_detections(&json).map_err(|e| match e {
        Scan2RxError::InvalidDetections { detail } => Scan2RxError::InvalidDetectionFile {
            path: PathBuf::from(path),
            detail,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_center_and_height() {
        let b = BBox::new(0.0, 20.0, 60.0, 30.0);
        assert_eq!(b.center_y(), 25.0);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn vertical_overlap_of_disjoint_boxes_is_negative() {
        let a = BBox::new(0.0, 0.0, 40.0, 10.0);
        let b = BBox::new(0.0, 20.0, 60.0, 30.0);
        assert!(a.vertical_overlap(&b) < 0.0);
    }

    #[test]
    fn parse_valid_result_file() {
        let json = r#"{
            "rec_texts": ["Name:", "John"],
            "rec_boxes": [[0, 0, 40, 10], [45, 1, 80, 9]]
        }"#;
        let dets = parse_detections(json).unwrap();
        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0].text, "Name:");
        assert_eq!(dets[1].bbox.x_min, 45.0);
    }

    #[test]
    fn parse_rejects_length_mismatch() {
        let json = r#"{
            "rec_texts": ["a", "b"],
            "rec_boxes": [[0, 0, 1, 1]]
        }"#;
        let err = parse_detections(json).unwrap_err();
        assert!(matches!(err, Scan2RxError::InvalidDetections { .. }));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(parse_detections("not json").is_err());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = load_detections("/definitely/not/a/real/file.json").unwrap_err();
        assert!(matches!(err, Scan2RxError::DetectionFileNotFound { .. }));
    }

    #[test]
    fn load_round_trip_through_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(
            file,
            r#"{{"rec_texts": ["Hb", "12.1"], "rec_boxes": [[0, 0, 20, 10], [30, 0, 55, 10]]}}"#
        )
        .unwrap();
        let dets = load_detections(file.path()).unwrap();
        assert_eq!(dets.len(), 2);
        assert_eq!(dets[1].text, "12.1");
    }
}
