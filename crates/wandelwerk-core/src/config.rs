// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Paths to the external tools the pipeline drives.
///
/// The defaults are bare program names resolved through `PATH`; deployments
/// with vendored binaries point these at absolute paths instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// libvips CLI, used for pyramidal tiled TIFF access copies.
    pub vips_path: PathBuf,
    /// ffmpeg CLI, used for audio/video transcoding and frame extraction.
    pub ffmpeg_path: PathBuf,
    /// tesseract CLI, used for OCR derivatives.
    pub tesseract_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vips_path: PathBuf::from("vips"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            tesseract_path: PathBuf::from("tesseract"),
        }
    }
}
