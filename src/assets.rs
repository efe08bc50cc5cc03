//! Image assets handed to the composer.
//!
//! Decoding sits in front of the core: the composer only ever sees an
//! [`ImageAsset`] with known dimensions, or nothing at all.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::{CardError, CardResult};

/// Encoded image bytes ready to be inlined as a `data:` URI, plus the pixel
/// size used by the fit math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub data: Arc<[u8]>,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImageAsset {
    /// Build an asset from an uploaded file's bytes.
    ///
    /// PNG and JPEG are embedded untouched; anything else the codec can read
    /// is re-encoded to PNG.
    pub fn decode(bytes: &[u8]) -> CardResult<Self> {
        let format = image::guess_format(bytes).map_err(|err| CardError::decode(err.to_string()))?;
        match format {
            ImageFormat::Png | ImageFormat::Jpeg => {
                let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
                    .into_dimensions()
                    .map_err(|err| CardError::decode(err.to_string()))?;
                Ok(Self::from_parts(bytes.to_vec(), mime_for(format), width, height))
            }
            _ => {
                let decoded = image::load_from_memory(bytes)
                    .map_err(|err| CardError::decode(err.to_string()))?;
                Self::from_rgba8(decoded.width(), decoded.height(), decoded.to_rgba8().into_raw())
            }
        }
    }

    /// Encode a raw RGBA8 buffer as PNG.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> CardResult<Self> {
        let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            CardError::decode(format!("pixel buffer does not match {width}x{height} RGBA"))
        })?;
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|err| CardError::decode(err.to_string()))?;
        Ok(Self::from_parts(png, "image/png", width, height))
    }

    pub fn from_parts(data: Vec<u8>, mime: &'static str, width: u32, height: u32) -> Self {
        Self {
            data: Arc::from(data),
            mime,
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "image/jpeg",
        _ => "image/png",
    }
}

/// Read and decode a photo from disk.
///
/// Unreadable or undecodable files degrade to "no photo": the card is still
/// composed, only that slot stays empty.
pub fn load_image(path: &Path) -> Option<ImageAsset> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "could not read photo, leaving slot empty");
            return None;
        }
    };
    decode_or_skip(&bytes, &path.display().to_string())
}

/// Decode in-memory bytes, logging and dropping the image on failure.
pub fn decode_or_skip(bytes: &[u8], source: &str) -> Option<ImageAsset> {
    match ImageAsset::decode(bytes) {
        Ok(asset) => {
            tracing::debug!(source, width = asset.width, height = asset.height, mime = asset.mime, "decoded photo");
            Some(asset)
        }
        Err(err) => {
            tracing::warn!(source, %err, "could not decode photo, leaving slot empty");
            None
        }
    }
}
