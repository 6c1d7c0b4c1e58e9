pub mod config;
pub mod errors;
pub mod ffi;
pub mod logging;
pub mod processing;
pub mod tensor;
pub mod thresholds;

// Re-export commonly used types for convenience
pub use config::ParserConfig;
pub use errors::ParseError;
pub use processing::post::{Detection, PostProcessor, RowOutcome, parse_detections};
pub use tensor::{LayerView, NetworkInfo, NMS_ROW_WIDTH};
pub use thresholds::{ClassThresholds, DEFAULT_NUM_CLASSES};
