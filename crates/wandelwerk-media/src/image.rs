// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image transforms — decode, auto-orientation, resize, JPEG encode. Operates
// on in-memory images using the `image` crate.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{debug, instrument};

use wandelwerk_core::error::{Result, WandelwerkError};

/// Longest edge of a thumbnail derivative, in pixels.
pub const THUMBNAIL_MAX_PX: u32 = 200;
/// JPEG quality used for thumbnail derivatives.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 90;

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and
/// returns a new `ImageProcessor` wrapping the transformed image, enabling
/// method chaining.
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes (TIFF, JPEG, PNG, etc.) and apply the
    /// orientation embedded in the file's metadata, so later transforms see
    /// the image the way a viewer would. Re-encoding from the decoded pixels
    /// is what strips the source metadata from every output.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|err| {
                WandelwerkError::Image(format!("failed to sniff image format: {err}"))
            })?;
        let mut decoder = reader.into_decoder().map_err(|err| {
            WandelwerkError::Image(format!("failed to decode image: {err}"))
        })?;
        let orientation = decoder.orientation().map_err(|err| {
            WandelwerkError::Image(format!("failed to read image orientation: {err}"))
        })?;
        let mut image = DynamicImage::from_decoder(decoder).map_err(|err| {
            WandelwerkError::Image(format!("failed to decode image: {err}"))
        })?;
        image.apply_orientation(orientation);
        debug!(
            width = image.width(),
            height = image.height(),
            ?orientation,
            "Image decoded"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Downscale so the longer edge is at most `max_px`, preserving aspect
    /// ratio. Images already within bounds pass through untouched. Uses
    /// Lanczos3 filtering for high-quality downscaling.
    #[instrument(skip(self), fields(max_px))]
    pub fn resize_to_fit(self, max_px: u32) -> Self {
        if self.image.width().max(self.image.height()) <= max_px {
            return self;
        }
        let resized = self.image.resize(max_px, max_px, FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            WandelwerkError::Image(format!("JPEG encoding failed: {err}"))
        })?;
        Ok(buffer)
    }
}

/// The fixed thumbnail policy shared by the image and video strategies:
/// auto-orient, longest edge ≤ 200 px, JPEG quality 90, metadata stripped.
pub fn thumbnail_jpeg(data: &[u8]) -> Result<Vec<u8>> {
    ImageProcessor::from_bytes(data)?
        .resize_to_fit(THUMBNAIL_MAX_PX)
        .to_jpeg_bytes(THUMBNAIL_JPEG_QUALITY)
}
