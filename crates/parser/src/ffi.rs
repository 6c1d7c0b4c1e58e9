//! Boundary with the DeepStream `nvinfer` custom parser ABI.
//!
//! The host calls `NvDsInferParseCustomYolorNms` with C++ standard library
//! types, so the exported symbol lives in `cpp/src/nvdsparsebbox_yolor.cpp`.
//! That shim unpacks the first output layer into slices and calls
//! [`parse_nms_output`] through this bridge.

use crate::{
    parse_detections,
    processing::post::Detection,
    tensor::{LayerView, NetworkInfo},
};

#[cxx::bridge(namespace = "yolor")]
pub mod ffi {
    /// Mirrors `NvDsInferNetworkInfo` (channels are irrelevant here).
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct NetworkDims {
        width: u32,
        height: u32,
    }

    /// Mirrors `NvDsInferParseObjectInfo`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct ParsedObject {
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        detection_confidence: f32,
        class_id: u32,
    }

    extern "Rust" {
        /// Throws `rust::Error` on contract violations.
        fn parse_nms_output(
            dims: &[u32],
            buffer: &[f32],
            network: &NetworkDims,
            thresholds: &[f32],
        ) -> Result<Vec<ParsedObject>>;

        fn init_plugin_logging();
    }
}

pub use ffi::{NetworkDims, ParsedObject};

impl From<Detection> for ParsedObject {
    fn from(d: Detection) -> Self {
        Self {
            left: d.left,
            top: d.top,
            width: d.width,
            height: d.height,
            detection_confidence: d.confidence,
            class_id: d.class_id,
        }
    }
}

impl From<&NetworkDims> for NetworkInfo {
    fn from(dims: &NetworkDims) -> Self {
        NetworkInfo::new(dims.width, dims.height)
    }
}

pub fn parse_nms_output(
    dims: &[u32],
    buffer: &[f32],
    network: &NetworkDims,
    thresholds: &[f32],
) -> Result<Vec<ParsedObject>, crate::ParseError> {
    let detections = parse_detections(LayerView::new(dims, buffer), network.into(), thresholds)
        .inspect_err(|e| tracing::error!(error = %e, "Rejected NMS output"))?;

    Ok(detections.into_iter().map(ParsedObject::from).collect())
}

/// Install the subscriber once per process; a host that already owns one keeps it.
pub fn init_plugin_logging() {
    let environment = common::Environment::from_env();
    let log_level = std::env::var("LOG_LEVEL").ok();
    if common::setup_logging(log_level, environment).is_ok() {
        tracing::info!(
            environment = environment.as_str(),
            "YOLOR NMS parser plugin logging initialized"
        );
    }
}
