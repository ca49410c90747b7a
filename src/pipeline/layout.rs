//! Line reconstruction: turn an unordered set of OCR detections into
//! reading-order text.
//!
//! ## Why is this necessary?
//!
//! The OCR engine emits detections with geometry but no order. A human
//! reads a lab report top-to-bottom, left-to-right, and the language model
//! consuming this text needs the same ordering to associate labels with
//! values ("Hb" with "12.1"). Row grouping is greedy over a single
//! vertical-overlap test rather than a full clustering pass: detections on
//! one visual line overlap heavily, detections on adjacent lines barely at
//! all, so one threshold separates them reliably.
//!
//! ## Ordering guarantees
//!
//! Detections are sorted by vertical midpoint with a stable sort, so two
//! detections with identical `center_y` keep their original input order.
//! Given a fixed input ordering, reconstruction is fully deterministic.

use crate::config::LayoutConfig;
use crate::detection::Detection;
use crate::error::Scan2RxError;
use tracing::debug;

/// Reading-order lines reconstructed from one detection set.
///
/// Line order is semantically meaningful (top-to-bottom reading order) and
/// is preserved end-to-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedDocument {
    pub lines: Vec<String>,
}

impl ReconstructedDocument {
    /// Serialise the document as newline-joined text with a trailing
    /// newline, the exact form injected into the LLM context downstream.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Number of reconstructed lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Reconstruct reading-order lines from an unordered detection set.
///
/// # Algorithm
/// 1. Sort by vertical midpoint (stable — ties keep input order).
/// 2. Greedily group into rows: a detection joins the current row when its
///    vertical overlap with the row's **last** detection exceeds
///    `overlap_ratio` of the shorter height (strict inequality — an
///    overlap of exactly the threshold starts a new row).
/// 3. Sort each row left-to-right by `x_min`.
/// 4. Serialise each row, inserting `max(1, floor(gap / gap_px_per_space))`
///    spaces before every detection after the first.
///
/// # Errors
/// [`Scan2RxError::EmptyDetections`] when `detections` is empty — row
/// seeding has no defined result on empty input.
pub fn reconstruct(
    detections: &[Detection],
    config: &LayoutConfig,
) -> Result<ReconstructedDocument, Scan2RxError> {
    if detections.is_empty() {
        return Err(Scan2RxError::EmptyDetections);
    }

    let mut sorted: Vec<&Detection> = detections.iter().collect();
    sorted.sort_by(|a, b| a.bbox.center_y().total_cmp(&b.bbox.center_y()));

    let mut rows: Vec<Vec<&Detection>> = Vec::new();
    let mut current: Vec<&Detection> = vec![sorted[0]];

    for det in &sorted[1..] {
        let last = current[current.len() - 1];
        let overlap = det.bbox.vertical_overlap(&last.bbox);
        let min_height = det.bbox.height().min(last.bbox.height());

        if overlap > config.overlap_ratio * min_height {
            current.push(det);
        } else {
            rows.push(close_row(current));
            current = vec![det];
        }
    }
    rows.push(close_row(current));

    debug!(
        detections = detections.len(),
        rows = rows.len(),
        "grouped detections into rows"
    );

    let lines = rows.iter().map(|row| serialise_row(row, config)).collect();
    Ok(ReconstructedDocument { lines })
}

/// Finish a row: order its detections left-to-right.
fn close_row(mut row: Vec<&Detection>) -> Vec<&Detection> {
    row.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
    row
}

/// Concatenate a row's texts with gap-proportional whitespace.
fn serialise_row(row: &[&Detection], config: &LayoutConfig) -> String {
    let mut line = String::new();
    let mut prev_x_max = 0.0_f32;

    for (i, det) in row.iter().enumerate() {
        if i > 0 {
            let gap = det.bbox.x_min - prev_x_max;
            let spaces = ((gap / config.gap_px_per_space).floor() as i64).max(1) as usize;
            for _ in 0..spaces {
                line.push(' ');
            }
        }
        line.push_str(&det.text);
        prev_x_max = det.bbox.x_max;
    }

    line
}
