use thiserror::Error;

/// Contract violations raised by the parser.
///
/// Rows that are filtered out (low confidence, degenerate boxes) are not errors;
/// see [`crate::RowOutcome`]. Every variant here means the caller handed over
/// input the parser cannot interpret, and no partial result is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("No output layer provided")]
    MissingOutputLayer,

    #[error("Expected a 2-D output tensor, got {0} dimensions")]
    InvalidDimensionality(usize),

    #[error("Expected {expected} values per row, got {actual}")]
    InvalidRowWidth { expected: usize, actual: usize },

    #[error("Output buffer holds {actual} values, tensor shape requires {expected}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Invalid network dimensions {width}x{height}")]
    InvalidNetworkDims { width: u32, height: u32 },

    #[error(
        "Class index {class_index} at row {row} is outside the threshold table ({num_classes} classes)"
    )]
    ClassOutOfRange {
        row: usize,
        class_index: f32,
        num_classes: usize,
    },
}

impl ParseError {
    /// All parser errors are caller-side precondition failures; there is no
    /// transient or retryable error kind.
    pub fn is_contract_violation(&self) -> bool {
        true
    }
}
