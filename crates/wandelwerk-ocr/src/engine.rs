// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tesseract wrapper — runs the OCR executable over a materialized master and
// manages the three sibling outputs (plain text, text-only PDF, hOCR).

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use wandelwerk_core::config::AppConfig;
use wandelwerk_core::error::Result;
use wandelwerk_core::types::OcrSettings;
use wandelwerk_media::tools::run_tool;

use crate::language::LanguagePreparer;

/// OCR engine wrapping the `tesseract` CLI.
///
/// Holds the supported-language list alongside the executable path. Query
/// the engine once per process with [`detect`](Self::detect) and reuse it —
/// the list never changes while the process lives.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    tesseract: PathBuf,
    supported: Vec<String>,
}

impl OcrEngine {
    /// Build an engine with an explicit supported-language list.
    pub fn new(tesseract: impl Into<PathBuf>, supported: Vec<String>) -> Self {
        Self {
            tesseract: tesseract.into(),
            supported,
        }
    }

    /// Query the executable for its supported languages via `--list-langs`.
    #[instrument(skip_all)]
    pub fn detect(tesseract: impl Into<PathBuf>) -> Result<Self> {
        let tesseract = tesseract.into();
        let output = run_tool(
            "tesseract",
            &tesseract,
            &[OsString::from("--list-langs")],
        )?;
        // tesseract < 4.1 prints the list on stderr.
        let mut supported = parse_list_langs(&String::from_utf8_lossy(&output.stdout));
        if supported.is_empty() {
            supported = parse_list_langs(&String::from_utf8_lossy(&output.stderr));
        }
        info!(count = supported.len(), "Detected tesseract languages");
        Ok(Self {
            tesseract,
            supported,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::detect(config.tesseract_path.clone())
    }

    pub fn supported_languages(&self) -> &[String] {
        &self.supported
    }

    /// Preparer for one asset's requested languages and viewing direction.
    pub fn preparer(&self, settings: &OcrSettings) -> LanguagePreparer {
        LanguagePreparer::new(
            settings.languages.clone(),
            settings.viewing_direction.clone(),
            self.supported.clone(),
        )
    }

    /// True iff the requested languages resolve to a usable argument.
    /// Callers check this first to skip invocation — and the filesystem
    /// churn that comes with it — for un-OCR-able assets.
    pub fn ocrable(&self, settings: &OcrSettings) -> bool {
        self.preparer(settings).argument().is_some()
    }

    /// Run OCR over `input`, writing `.txt`, `.pdf`, and `.hocr` siblings of
    /// `output_base`.
    ///
    /// Returns `None` without invoking the engine when the language set is
    /// unusable, and `None` after removing every sibling when the engine ran
    /// but extracted no text. Identical inputs produce identical outputs —
    /// the invocation carries no per-run state.
    #[instrument(skip(self, settings), fields(input = %input.display()))]
    pub fn ocr(
        &self,
        input: &Path,
        output_base: &Path,
        settings: &OcrSettings,
    ) -> Result<Option<OcrSiblings>> {
        let Some(languages) = self.preparer(settings).argument() else {
            debug!("No usable OCR languages, skipping invocation");
            return Ok(None);
        };

        let siblings = OcrSiblings::for_base(output_base);
        // If tesseract crashes the guard above still removes whatever
        // partial siblings it managed to write.
        run_tool(
            "tesseract",
            &self.tesseract,
            &ocr_args(input, output_base, &languages),
        )?;
        Ok(siblings.harvest())
    }
}

/// Fixed tesseract invocation: text-only PDF layer, page 0 only (some
/// preservation TIFFs embed a secondary thumbnail page), and the three
/// output configs sharing one basename.
fn ocr_args(input: &Path, output_base: &Path, languages: &str) -> Vec<OsString> {
    vec![
        input.into(),
        output_base.into(),
        "-l".into(),
        languages.into(),
        "-c".into(),
        "textonly_pdf=1".into(),
        "-c".into(),
        "tessedit_page_number=0".into(),
        "txt".into(),
        "pdf".into(),
        "hocr".into(),
    ]
}

/// Parse `--list-langs` output: one code per line after a header line.
fn parse_list_langs(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.ends_with(':') && !line.contains(' '))
        .map(String::from)
        .collect()
}

/// The three sibling outputs of one tesseract run.
///
/// Whatever exists is removed on drop, so partial artifacts never outlive
/// the call that created them. Callers copy the content they want into
/// [`DerivativeFile`](wandelwerk_media::DerivativeFile)s before the guard
/// goes out of scope.
#[derive(Debug)]
pub struct OcrSiblings {
    txt: PathBuf,
    pdf: PathBuf,
    hocr: PathBuf,
}

impl OcrSiblings {
    fn for_base(base: &Path) -> Self {
        Self {
            txt: base.with_extension("txt"),
            pdf: base.with_extension("pdf"),
            hocr: base.with_extension("hocr"),
        }
    }

    /// Success test: text was extracted iff the `.txt` sibling exists and is
    /// non-empty. On failure the guard is dropped here, removing every
    /// sibling immediately.
    fn harvest(self) -> Option<Self> {
        let has_text = std::fs::metadata(&self.txt)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false);
        if has_text {
            Some(self)
        } else {
            debug!("OCR extracted no text, removing sibling outputs");
            None
        }
    }

    pub fn txt(&self) -> &Path {
        &self.txt
    }

    pub fn pdf(&self) -> &Path {
        &self.pdf
    }

    pub fn hocr(&self) -> &Path {
        &self.hocr
    }
}

impl Drop for OcrSiblings {
    fn drop(&mut self) {
        for path in [&self.txt, &self.pdf, &self.hocr] {
            if let Err(err) = std::fs::remove_file(path) {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(path = %path.display(), %err, "Failed to remove OCR output");
                }
            }
        }
    }
}
