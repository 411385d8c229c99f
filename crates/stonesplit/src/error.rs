use stonesplit_core::{ParamError, RgbaImageView, RGBA_CHANNELS};

/// Problems with the pixel buffer handed to the pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("image has zero area (width={width}, height={height})")]
    EmptyImage { width: usize, height: usize },

    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("image dimensions overflow the addressable buffer size")]
    DimensionsOverflow,
}

/// Errors returned by the analysis entry points.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ParamError),
}

/// Reject views the stages cannot index safely.
pub fn check_view(view: &RgbaImageView<'_>) -> Result<(), InputError> {
    if view.width == 0 || view.height == 0 {
        return Err(InputError::EmptyImage {
            width: view.width,
            height: view.height,
        });
    }
    let expected = view
        .width
        .checked_mul(view.height)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS))
        .ok_or(InputError::DimensionsOverflow)?;
    if view.data.len() != expected {
        return Err(InputError::BufferLength {
            expected,
            got: view.data.len(),
        });
    }
    Ok(())
}
