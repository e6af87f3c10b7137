// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audio strategy — MP3 access copies for the WAV family.

use tracing::{info, instrument};

use wandelwerk_core::error::{Result, WandelwerkError};
use wandelwerk_media::{DerivativeFile, MediaTranscoder, SourceFile};

use super::Generator;

/// Strategy for WAV-family preservation masters. Audio has no visual
/// preview, so only the access copy is produced.
pub struct AudioGenerator {
    source: SourceFile,
    transcoder: MediaTranscoder,
}

impl AudioGenerator {
    pub fn new(source: SourceFile, transcoder: MediaTranscoder) -> Self {
        Self { source, transcoder }
    }
}

impl Generator for AudioGenerator {
    fn thumbnail(&mut self) -> Result<Option<DerivativeFile>> {
        Ok(None)
    }

    #[instrument(skip(self))]
    fn access(&mut self) -> Result<Option<DerivativeFile>> {
        let transcoder = &self.transcoder;
        self.source.with_tmp_file(|input| {
            let out = DerivativeFile::new("audio/mpeg", Some("mp3"))?;
            transcoder
                .wav_to_mp3(input, out.path())
                .map_err(|err| WandelwerkError::generation("audio access copy failed", err))?;
            info!(bytes = out.len()?, "Audio access copy generated");
            Ok(Some(out))
        })
    }
}
