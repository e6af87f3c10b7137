// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image strategy — JPEG thumbnails, pyramidal tiled TIFF access copies, and
// OCR derivatives for TIFF preservation masters.

use std::path::Path;

use tracing::{info, instrument};
use uuid::Uuid;

use wandelwerk_core::error::{Result, WandelwerkError};
use wandelwerk_core::types::OcrSettings;
use wandelwerk_media::image::thumbnail_jpeg;
use wandelwerk_media::{DerivativeFile, SourceFile, TiffTiler};
use wandelwerk_ocr::OcrEngine;

use super::{Generator, OcrDerivatives};

/// Strategy for TIFF preservation masters. The only family that also
/// carries OCR derivatives.
pub struct ImageGenerator {
    source: SourceFile,
    tiler: TiffTiler,
}

impl ImageGenerator {
    pub fn new(source: SourceFile, tiler: TiffTiler) -> Self {
        Self { source, tiler }
    }

    /// Run OCR over the master and wrap the sibling outputs as derivatives.
    ///
    /// Returns the empty set — without touching the filesystem — when the
    /// requested languages are unusable, and after a run that extracted no
    /// text. Otherwise all three outputs are populated.
    #[instrument(skip_all)]
    pub fn ocr_derivatives(
        &mut self,
        engine: &OcrEngine,
        settings: &OcrSettings,
    ) -> Result<OcrDerivatives> {
        if !engine.ocrable(settings) {
            info!("Asset is not OCR-able with the requested languages");
            return Ok(OcrDerivatives::empty());
        }

        self.source.with_tmp_file(|input| {
            // Unique basename so concurrent workers never collide.
            let base = std::env::temp_dir().join(format!("wandelwerk-ocr-{}", Uuid::new_v4()));
            let Some(siblings) = engine
                .ocr(input, &base, settings)
                .map_err(|err| WandelwerkError::generation("OCR invocation failed", err))?
            else {
                info!("OCR extracted no text");
                return Ok(OcrDerivatives::empty());
            };

            let set = OcrDerivatives {
                text: Some(copy_into("text/plain", Some("txt"), siblings.txt())?),
                textonly_pdf: Some(copy_into("application/pdf", Some("pdf"), siblings.pdf())?),
                hocr: Some(copy_into("text/html", Some("hocr"), siblings.hocr())?),
            };
            info!("OCR derivatives generated");
            Ok(set)
            // `siblings` drops here, removing the raw tesseract outputs.
        })
    }
}

/// Copy one tesseract output into an owned derivative artifact.
fn copy_into(media_type: &str, extension: Option<&str>, source: &Path) -> Result<DerivativeFile> {
    let mut file = DerivativeFile::new(media_type, extension)?;
    file.write_all(&std::fs::read(source)?)?;
    Ok(file)
}

impl Generator for ImageGenerator {
    #[instrument(skip(self))]
    fn thumbnail(&mut self) -> Result<Option<DerivativeFile>> {
        let bytes = self.source.read()?;
        let jpeg = thumbnail_jpeg(&bytes)
            .map_err(|err| WandelwerkError::generation("image thumbnail failed", err))?;
        let mut out = DerivativeFile::new("image/jpeg", Some("jpg"))?;
        out.write_all(&jpeg)?;
        info!(bytes = jpeg.len(), "Image thumbnail generated");
        Ok(Some(out))
    }

    /// Tile-server access copy: auto-rotated, pyramidal, 256×256
    /// JPEG-compressed tiles, flagged for the IIIF image server.
    #[instrument(skip(self))]
    fn access(&mut self) -> Result<Option<DerivativeFile>> {
        let tiler = &self.tiler;
        self.source.with_tmp_file(|input| {
            let out = DerivativeFile::new("image/tiff", Some("tif"))?.iiif_image(true);
            tiler
                .pyramidal_tiff(input, out.path())
                .map_err(|err| WandelwerkError::generation("image access copy failed", err))?;
            info!(bytes = out.len()?, "Image access copy generated");
            Ok(Some(out))
        })
    }
}
