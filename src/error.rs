use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

/// Failures surfaced by the card renderer.
///
/// Composition itself never fails: these cover request parsing, the image
/// decoding glue in front of it and the rasterizer behind it.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("unknown template '{0}' (expected one of A, B, C, D, E, F)")]
    UnknownTemplate(String),

    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("rasterization is not available in this build (enable the `raster` feature)")]
    RasterUnavailable,

    #[error("invalid project snapshot: {0}")]
    Project(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CardError {
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Whether the error only takes away an optional output (raster export)
    /// rather than invalidating the render.
    pub fn is_degraded_capability(&self) -> bool {
        matches!(self, Self::Raster(_) | Self::RasterUnavailable)
    }
}
