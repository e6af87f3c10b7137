// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Derivative generators — one strategy per supported media family.

pub mod audio;
pub mod default;
pub mod image;
pub mod video;

pub use audio::AudioGenerator;
pub use default::DefaultGenerator;
pub use image::ImageGenerator;
pub use video::VideoGenerator;

use wandelwerk_core::error::Result;
use wandelwerk_media::DerivativeFile;

/// One derivative strategy.
///
/// Each operation reads from the generator's own master stream and hands
/// ownership of every produced artifact to the caller, which persists the
/// bytes and then releases the artifact. `None` means this family has no
/// such derivative — not a failure.
pub trait Generator {
    /// Small visual preview, absent for families without one.
    fn thumbnail(&mut self) -> Result<Option<DerivativeFile>>;
    /// End-user access copy, absent when the type is unsupported.
    fn access(&mut self) -> Result<Option<DerivativeFile>>;
}

/// The OCR result set. All three outputs are populated when text was
/// extracted, and all three absent when OCR was skipped or found nothing —
/// never a mix.
#[derive(Debug, Default)]
pub struct OcrDerivatives {
    pub text: Option<DerivativeFile>,
    pub textonly_pdf: Option<DerivativeFile>,
    pub hocr: Option<DerivativeFile>,
}

impl OcrDerivatives {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.textonly_pdf.is_none() && self.hocr.is_none()
    }

    /// Release every backing file.
    pub fn cleanup(self) -> Result<()> {
        for file in [self.text, self.textonly_pdf, self.hocr]
            .into_iter()
            .flatten()
        {
            file.cleanup()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wandelwerk_core::error::WandelwerkError;

    #[test]
    fn empty_result_set_reports_empty() {
        let set = OcrDerivatives::empty();
        assert!(set.is_empty());
        set.cleanup().unwrap();
    }

    #[test]
    fn generation_errors_keep_their_cause() {
        let source = WandelwerkError::Tool {
            tool: "ffmpeg".to_string(),
            status: 1,
            stderr: "bad input".to_string(),
        };
        let err = WandelwerkError::generation("video access copy failed", source);
        match err {
            WandelwerkError::Generator { message, source } => {
                assert_eq!(message, "video access copy failed");
                assert!(matches!(
                    source.as_deref(),
                    Some(WandelwerkError::Tool { .. })
                ));
            }
            other => panic!("expected Generator error, got {other:?}"),
        }
    }
}
