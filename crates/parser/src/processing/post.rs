use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    errors::ParseError,
    tensor::{LayerView, NMS_ROW_WIDTH, NetworkInfo},
    thresholds::ClassThresholds,
};

/// Boxes must be strictly larger than this many pixels on both axes.
const MIN_BOX_SIDE: f32 = 1.0;

/// One box in network-input pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
    pub class_id: u32,
}

/// What happened to a single NMS row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowOutcome {
    Accepted(Detection),
    BelowThreshold,
    TooSmall,
}

pub struct PostProcessor {
    pub thresholds: ClassThresholds,
}

impl PostProcessor {
    pub fn new(thresholds: ClassThresholds) -> Self {
        Self { thresholds }
    }

    pub fn parse_detections(
        &self,
        layer: LayerView<'_>,
        network: NetworkInfo,
    ) -> Result<Vec<Detection>, ParseError> {
        parse_detections(layer, network, self.thresholds.as_slice())
    }

    /// Parse the NMS output from the list of output layers handed over by the runtime.
    ///
    /// The NMS tensor is the first output layer; any further layers are ignored.
    pub fn parse_output_layers(
        &self,
        layers: &[LayerView<'_>],
        network: NetworkInfo,
    ) -> Result<Vec<Detection>, ParseError> {
        let layer = layers.first().copied().ok_or(ParseError::MissingOutputLayer)?;
        if layers.len() > 1 {
            tracing::debug!(
                ignored = layers.len() - 1,
                "Only the first output layer is parsed"
            );
        }
        self.parse_detections(layer, network)
    }

    pub fn classify_row(
        &self,
        row_idx: usize,
        row: &[f32],
        network: NetworkInfo,
    ) -> Result<RowOutcome, ParseError> {
        let (max_x, max_y) = network.max_coords()?;
        classify(row_idx, row, max_x, max_y, self.thresholds.as_slice())
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(ClassThresholds::default())
    }
}

/// Parse an `[N, 6]` NMS tensor of `(x1, y1, x2, y2, score, class)` rows.
///
/// Rows scoring at or below their class threshold and boxes of at most one pixel
/// on either axis are dropped. Surviving rows keep their input order.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(net_w = network.width, net_h = network.height)
)]
pub fn parse_detections(
    layer: LayerView<'_>,
    network: NetworkInfo,
    thresholds: &[f32],
) -> Result<Vec<Detection>, ParseError> {
    let (max_x, max_y) = network.max_coords()?;
    let rows = layer.nms_rows()?;

    let mut detections = Vec::new();
    let mut below_threshold = 0usize;
    let mut too_small = 0usize;

    for (row_idx, row) in rows.enumerate() {
        match classify(row_idx, row, max_x, max_y, thresholds)? {
            RowOutcome::Accepted(detection) => detections.push(detection),
            RowOutcome::BelowThreshold => below_threshold += 1,
            RowOutcome::TooSmall => too_small += 1,
        }
    }

    tracing::debug!(
        accepted = detections.len(),
        below_threshold,
        too_small,
        "Parsed NMS output"
    );

    Ok(detections)
}

fn classify(
    row_idx: usize,
    row: &[f32],
    max_x: f32,
    max_y: f32,
    thresholds: &[f32],
) -> Result<RowOutcome, ParseError> {
    let &[bx1, by1, bx2, by2, score, raw_class] = row else {
        return Err(ParseError::InvalidRowWidth {
            expected: NMS_ROW_WIDTH,
            actual: row.len(),
        });
    };

    let class_idx = class_index(row_idx, raw_class, thresholds.len())?;
    let threshold = thresholds[class_idx];

    // NaN on either side rejects the row
    if score.partial_cmp(&threshold) != Some(Ordering::Greater) {
        tracing::trace!(row = row_idx, score, threshold, "Row below threshold");
        return Ok(RowOutcome::BelowThreshold);
    }

    let x1 = bx1.clamp(0.0, max_x);
    let y1 = by1.clamp(0.0, max_y);
    let x2 = bx2.clamp(0.0, max_x);
    let y2 = by2.clamp(0.0, max_y);

    let width = (x2 - x1).clamp(0.0, max_x);
    let height = (y2 - y1).clamp(0.0, max_y);

    if !(width > MIN_BOX_SIDE && height > MIN_BOX_SIDE) {
        tracing::trace!(row = row_idx, width, height, "Box too small");
        return Ok(RowOutcome::TooSmall);
    }

    Ok(RowOutcome::Accepted(Detection {
        left: x1,
        top: y1,
        width,
        height,
        confidence: score,
        class_id: class_idx as u32,
    }))
}

/// Class indices travel as floats; truncate toward zero like a C cast.
#[inline]
fn class_index(row_idx: usize, raw: f32, num_classes: usize) -> Result<usize, ParseError> {
    let truncated = raw.trunc();
    if truncated >= 0.0 && (truncated as usize) < num_classes {
        Ok(truncated as usize)
    } else {
        Err(ParseError::ClassOutOfRange {
            row: row_idx,
            class_index: raw,
            num_classes,
        })
    }
}
