// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wandelwerk — derivative & OCR generation for preservation masters.
//
// Thin driver standing in for the repository's background jobs: takes one
// master file, generates every derivative its MIME type supports, persists
// the bytes into an output directory, and reports fixity digests.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use wandelwerk_core::config::AppConfig;
use wandelwerk_core::error::Result;
use wandelwerk_core::types::{AssetId, OcrSettings};
use wandelwerk_derivative::{Asset, Derivatives};
use wandelwerk_media::{DerivativeFile, SourceFile};
use wandelwerk_ocr::OcrEngine;

#[derive(Debug, Parser)]
#[command(
    name = "wandelwerk",
    version,
    about = "Generate preservation derivatives (thumbnail, access copy, OCR) for a master file"
)]
struct Cli {
    /// Preservation master to process.
    input: PathBuf,

    /// Declared MIME type; inferred from the file extension when omitted.
    #[arg(long)]
    media_type: Option<String>,

    /// Directory receiving the generated derivatives.
    #[arg(long, default_value = "derivatives")]
    out_dir: PathBuf,

    /// OCR language code, repeatable, in priority order (image masters only).
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Viewing-direction hint; "left-to-right" disables vertical CJK models.
    #[arg(long)]
    viewing_direction: Option<String>,

    /// JSON config file overriding the external tool paths.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// A master sitting on the local filesystem.
struct FileAsset {
    path: PathBuf,
    media_type: String,
}

impl Asset for FileAsset {
    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn source(&self) -> Result<SourceFile> {
        SourceFile::open(&self.path)
    }
}

/// Infer a MIME type from the file extension for the formats the pipeline
/// handles. Everything else is declared opaque and dispatches to the
/// no-op strategy.
fn media_type_for(path: &Path) -> Option<&'static str> {
    match path
        .extension()?
        .to_str()?
        .to_ascii_lowercase()
        .as_str()
    {
        "tif" | "tiff" => Some("image/tiff"),
        "wav" | "wave" => Some("audio/wav"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

/// File extension for persisting a derivative of the given MIME type.
fn extension_for(media_type: &str) -> &'static str {
    match media_type {
        "image/jpeg" => "jpg",
        "image/tiff" => "tif",
        "audio/mpeg" => "mp3",
        "video/mp4" => "mp4",
        "application/pdf" => "pdf",
        "text/plain" => "txt",
        "text/html" => "hocr",
        _ => "bin",
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!(%err, "Derivative generation failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config: AppConfig = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    let media_type = cli
        .media_type
        .clone()
        .or_else(|| media_type_for(&cli.input).map(String::from))
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let asset_id = AssetId::new();
    info!(%asset_id, media_type, input = %cli.input.display(), "Processing preservation master");

    fs::create_dir_all(&cli.out_dir)?;

    // The supported-language list is queried once here and threaded through;
    // without requested languages the engine is never consulted at all.
    let engine = if cli.languages.is_empty() {
        OcrEngine::new(config.tesseract_path.clone(), Vec::new())
    } else {
        OcrEngine::from_config(&config)?
    };

    let asset = FileAsset {
        path: cli.input.clone(),
        media_type,
    };
    let derivatives = Derivatives::new(&asset, &config, &engine);

    match derivatives.thumbnail()? {
        Some(file) => persist(file, &cli.out_dir, "thumbnail")?,
        None => info!("No thumbnail for this media type"),
    }
    match derivatives.access()? {
        Some(file) => persist(file, &cli.out_dir, "access")?,
        None => info!("No access copy for this media type"),
    }

    let settings = OcrSettings::new(cli.languages.clone(), cli.viewing_direction.clone());
    let ocr_set = derivatives.ocr(&settings)?;
    if ocr_set.is_empty() {
        info!("No OCR derivatives");
    } else {
        if let Some(file) = ocr_set.text {
            persist(file, &cli.out_dir, "text")?;
        }
        if let Some(file) = ocr_set.textonly_pdf {
            persist(file, &cli.out_dir, "textonly_pdf")?;
        }
        if let Some(file) = ocr_set.hocr {
            persist(file, &cli.out_dir, "hocr")?;
        }
    }

    Ok(())
}

/// Persist one derivative and release it — the caller-side half of the
/// ownership contract with the generators.
fn persist(mut file: DerivativeFile, out_dir: &Path, name: &str) -> Result<()> {
    let target = out_dir.join(format!("{name}.{}", extension_for(file.media_type())));
    let sha256 = file.sha256_hex()?;
    fs::write(&target, file.read()?)?;
    info!(
        target = %target.display(),
        media_type = file.media_type(),
        bytes = file.len()?,
        iiif_image = file.is_iiif_image(),
        %sha256,
        "Derivative persisted"
    );
    file.cleanup()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_inference_covers_the_supported_families() {
        assert_eq!(media_type_for(Path::new("a.tif")), Some("image/tiff"));
        assert_eq!(media_type_for(Path::new("a.TIFF")), Some("image/tiff"));
        assert_eq!(media_type_for(Path::new("a.wav")), Some("audio/wav"));
        assert_eq!(media_type_for(Path::new("a.mov")), Some("video/quicktime"));
        assert_eq!(media_type_for(Path::new("a.pdf")), None);
        assert_eq!(media_type_for(Path::new("noext")), None);
    }

    #[test]
    fn persisted_extensions_match_media_types() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/tiff"), "tif");
        assert_eq!(extension_for("audio/mpeg"), "mp3");
        assert_eq!(extension_for("video/mp4"), "mp4");
        assert_eq!(extension_for("text/html"), "hocr");
        assert_eq!(extension_for("application/x-unknown"), "bin");
    }
}
