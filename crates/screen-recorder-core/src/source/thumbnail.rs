use crate::{CaptureError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{RgbaImage, imageops};

/// Downscaled RGBA preview of a capture source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    image: RgbaImage,
}

impl Thumbnail {
    /// Decodes a PNG frame and shrinks it to at most `max_width` pixels wide,
    /// keeping the aspect ratio. Frames already narrower are kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Platform`] if the bytes are not a valid image.
    #[track_caller]
    pub fn from_png(bytes: &[u8], max_width: u32) -> CoreResult<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| CaptureError::Platform {
            reason: format!("Failed to decode thumbnail: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let (width, height) = (decoded.width(), decoded.height());
        if max_width == 0 || width <= max_width {
            return Ok(Self {
                image: decoded.into_rgba8(),
            });
        }

        let scaled_height = ((u64::from(height) * u64::from(max_width)) / u64::from(width)).max(1);
        let scaled_height = u32::try_from(scaled_height).unwrap_or(u32::MAX);

        Ok(Self {
            image: imageops::thumbnail(&decoded, max_width, scaled_height),
        })
    }

    /// Wraps raw RGBA pixels. Returns `None` if the buffer length does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, rgba).map(|image| Self { image })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA pixel data, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }
}
