use crate::errors::ParseError;

/// Values per NMS row: x1, y1, x2, y2, score, class index.
pub const NMS_ROW_WIDTH: usize = 6;

/// Network input resolution, used to clamp boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    pub width: u32,
    pub height: u32,
}

impl NetworkInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest valid x and y pixel coordinates.
    pub(crate) fn max_coords(&self) -> Result<(f32, f32), ParseError> {
        if self.width == 0 || self.height == 0 {
            return Err(ParseError::InvalidNetworkDims {
                width: self.width,
                height: self.height,
            });
        }
        Ok((self.width as f32 - 1.0, self.height as f32 - 1.0))
    }
}

/// Borrowed view over one output layer handed over by the inference runtime.
///
/// `dims` is the tensor shape as reported by the runtime (batch dimension
/// already stripped), `buffer` the host-side float data.
#[derive(Debug, Clone, Copy)]
pub struct LayerView<'a> {
    pub dims: &'a [u32],
    pub buffer: &'a [f32],
}

impl<'a> LayerView<'a> {
    pub fn new(dims: &'a [u32], buffer: &'a [f32]) -> Self {
        Self { dims, buffer }
    }

    /// Validate the `[N, 6]` shape and return the `N` rows.
    pub fn nms_rows(self) -> Result<impl Iterator<Item = &'a [f32]> + 'a, ParseError> {
        if self.dims.len() != 2 {
            return Err(ParseError::InvalidDimensionality(self.dims.len()));
        }

        let num_rows = self.dims[0] as usize;
        let row_width = self.dims[1] as usize;
        if row_width != NMS_ROW_WIDTH {
            return Err(ParseError::InvalidRowWidth {
                expected: NMS_ROW_WIDTH,
                actual: row_width,
            });
        }

        let expected = num_rows
            .checked_mul(NMS_ROW_WIDTH)
            .ok_or(ParseError::BufferTooShort {
                expected: usize::MAX,
                actual: self.buffer.len(),
            })?;
        if self.buffer.len() < expected {
            return Err(ParseError::BufferTooShort {
                expected,
                actual: self.buffer.len(),
            });
        }

        Ok(self.buffer[..expected].chunks_exact(NMS_ROW_WIDTH))
    }
}
