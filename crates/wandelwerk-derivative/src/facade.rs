// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The Derivatives facade — binds one asset's master stream to the generator
// its MIME type selects and exposes the named outputs to the calling job.

use tracing::instrument;

use wandelwerk_core::config::AppConfig;
use wandelwerk_core::error::Result;
use wandelwerk_core::types::OcrSettings;
use wandelwerk_media::{DerivativeFile, MediaTranscoder, SourceFile, TiffTiler};
use wandelwerk_ocr::OcrEngine;

use crate::dispatch::{self, GeneratorKind};
use crate::generate::{
    AudioGenerator, DefaultGenerator, Generator, ImageGenerator, OcrDerivatives, VideoGenerator,
};

/// Minimal view of a stored asset: its declared MIME type and a way to open
/// the preservation master. The record layer owns everything else.
pub trait Asset {
    fn media_type(&self) -> &str;
    /// Open a fresh rewindable stream over the preservation master.
    fn source(&self) -> Result<SourceFile>;
}

/// Entry point for the background job: one facade per asset, one generator
/// per operation.
///
/// Every operation opens its own [`SourceFile`] and allocates its own
/// artifacts, so a caller may compute `thumbnail` and `access` in either
/// order — or concurrently on separate facades — without shared state.
/// Ownership of each returned [`DerivativeFile`] transfers to the caller,
/// which persists the bytes and then releases the artifact.
pub struct Derivatives<'a, A: Asset> {
    asset: &'a A,
    config: &'a AppConfig,
    ocr: &'a OcrEngine,
}

impl<'a, A: Asset> Derivatives<'a, A> {
    pub fn new(asset: &'a A, config: &'a AppConfig, ocr: &'a OcrEngine) -> Self {
        Self { asset, config, ocr }
    }

    fn generator(&self) -> Result<Box<dyn Generator>> {
        Ok(match dispatch::select(self.asset.media_type()) {
            GeneratorKind::Image => Box::new(ImageGenerator::new(
                self.asset.source()?,
                TiffTiler::from_config(self.config),
            )),
            GeneratorKind::Audio => Box::new(AudioGenerator::new(
                self.asset.source()?,
                MediaTranscoder::from_config(self.config),
            )),
            GeneratorKind::Video => Box::new(VideoGenerator::new(
                self.asset.source()?,
                MediaTranscoder::from_config(self.config),
            )),
            GeneratorKind::Default => Box::new(DefaultGenerator),
        })
    }

    #[instrument(skip(self), fields(media_type = self.asset.media_type()))]
    pub fn thumbnail(&self) -> Result<Option<DerivativeFile>> {
        self.generator()?.thumbnail()
    }

    #[instrument(skip(self), fields(media_type = self.asset.media_type()))]
    pub fn access(&self) -> Result<Option<DerivativeFile>> {
        self.generator()?.access()
    }

    /// OCR derivatives. The empty set for every non-image asset and for
    /// image assets whose language configuration is unusable.
    #[instrument(skip(self, settings), fields(media_type = self.asset.media_type()))]
    pub fn ocr(&self, settings: &OcrSettings) -> Result<OcrDerivatives> {
        match dispatch::select(self.asset.media_type()) {
            GeneratorKind::Image => ImageGenerator::new(
                self.asset.source()?,
                TiffTiler::from_config(self.config),
            )
            .ocr_derivatives(self.ocr, settings),
            _ => Ok(OcrDerivatives::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// In-memory asset for exercising dispatch through the facade.
    struct MemoryAsset {
        media_type: &'static str,
        bytes: Vec<u8>,
    }

    impl Asset for MemoryAsset {
        fn media_type(&self) -> &str {
            self.media_type
        }

        fn source(&self) -> Result<SourceFile> {
            Ok(SourceFile::new(Cursor::new(self.bytes.clone())))
        }
    }

    /// Config pointing at binaries that must never be spawned — a test that
    /// reaches a tool wrapper fails loudly with a Tool error.
    fn unreachable_tools() -> AppConfig {
        AppConfig {
            vips_path: "/nonexistent/vips".into(),
            ffmpeg_path: "/nonexistent/ffmpeg".into(),
            tesseract_path: "/nonexistent/tesseract".into(),
        }
    }

    fn offline_engine() -> OcrEngine {
        OcrEngine::new("/nonexistent/tesseract", vec!["eng".to_string()])
    }

    #[test]
    fn unsupported_types_yield_no_derivatives() {
        let asset = MemoryAsset {
            media_type: "application/pdf",
            bytes: b"%PDF-1.4".to_vec(),
        };
        let config = unreachable_tools();
        let engine = offline_engine();
        let derivatives = Derivatives::new(&asset, &config, &engine);

        assert!(derivatives.thumbnail().unwrap().is_none());
        assert!(derivatives.access().unwrap().is_none());
        assert!(
            derivatives
                .ocr(&OcrSettings::new(vec!["eng".to_string()], None))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn image_thumbnail_runs_in_process() {
        use image::{DynamicImage, Rgb, RgbImage};

        // A real (small) PNG master; the thumbnail path never shells out.
        let img = RgbImage::from_pixel(320, 240, Rgb([10u8, 20, 30]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let asset = MemoryAsset {
            media_type: "image/tiff",
            bytes,
        };
        let config = unreachable_tools();
        let engine = offline_engine();
        let derivatives = Derivatives::new(&asset, &config, &engine);

        let mut thumb = derivatives.thumbnail().unwrap().unwrap();
        assert_eq!(thumb.media_type(), "image/jpeg");
        assert!(!thumb.is_iiif_image());
        let content = thumb.read().unwrap();
        assert_eq!(&content[..2], &[0xFF, 0xD8]);
        thumb.cleanup().unwrap();
    }

    #[test]
    fn image_ocr_with_unusable_languages_is_empty_without_io() {
        let asset = MemoryAsset {
            media_type: "image/tiff",
            bytes: b"not read".to_vec(),
        };
        let config = unreachable_tools();
        let engine = offline_engine();
        let derivatives = Derivatives::new(&asset, &config, &engine);

        // "xyz" never survives preparation, so tesseract is never spawned.
        let set = derivatives
            .ocr(&OcrSettings::new(vec!["xyz".to_string()], None))
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn audio_thumbnail_is_absent() {
        let asset = MemoryAsset {
            media_type: "audio/x-wav",
            bytes: b"RIFF".to_vec(),
        };
        let config = unreachable_tools();
        let engine = offline_engine();
        let derivatives = Derivatives::new(&asset, &config, &engine);

        assert!(derivatives.thumbnail().unwrap().is_none());
    }

    #[test]
    fn tool_failures_surface_as_generation_errors() {
        use wandelwerk_core::error::WandelwerkError;

        let asset = MemoryAsset {
            media_type: "audio/wav",
            bytes: b"RIFF".to_vec(),
        };
        let config = unreachable_tools();
        let engine = offline_engine();
        let derivatives = Derivatives::new(&asset, &config, &engine);

        let err = derivatives.access().unwrap_err();
        assert!(matches!(err, WandelwerkError::Generator { .. }));
    }
}
