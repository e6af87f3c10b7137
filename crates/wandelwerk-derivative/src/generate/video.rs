// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Video strategy — MP4 access copies and representative-frame thumbnails
// for QuickTime masters.

use tracing::{info, instrument};

use wandelwerk_core::error::{Result, WandelwerkError};
use wandelwerk_media::image::thumbnail_jpeg;
use wandelwerk_media::{DerivativeFile, MediaTranscoder, SourceFile};

use super::Generator;

/// Strategy for QuickTime preservation masters.
pub struct VideoGenerator {
    source: SourceFile,
    transcoder: MediaTranscoder,
}

impl VideoGenerator {
    pub fn new(source: SourceFile, transcoder: MediaTranscoder) -> Self {
        Self { source, transcoder }
    }
}

impl Generator for VideoGenerator {
    /// One representative frame — whichever ffmpeg's scene-selection
    /// heuristic picks, not necessarily frame zero — piped through the
    /// shared image-thumbnail policy.
    #[instrument(skip(self))]
    fn thumbnail(&mut self) -> Result<Option<DerivativeFile>> {
        let transcoder = &self.transcoder;
        self.source.with_tmp_file(|input| {
            let frame = transcoder
                .representative_frame(input)
                .map_err(|err| WandelwerkError::generation("video frame extraction failed", err))?;
            let jpeg = thumbnail_jpeg(&frame)
                .map_err(|err| WandelwerkError::generation("video thumbnail failed", err))?;
            let mut out = DerivativeFile::new("image/jpeg", Some("jpg"))?;
            out.write_all(&jpeg)?;
            info!(bytes = jpeg.len(), "Video thumbnail generated");
            Ok(Some(out))
        })
    }

    #[instrument(skip(self))]
    fn access(&mut self) -> Result<Option<DerivativeFile>> {
        let transcoder = &self.transcoder;
        self.source.with_tmp_file(|input| {
            let out = DerivativeFile::new("video/mp4", Some("mp4"))?;
            transcoder
                .mov_to_mp4(input, out.path())
                .map_err(|err| WandelwerkError::generation("video access copy failed", err))?;
            info!(bytes = out.len()?, "Video access copy generated");
            Ok(Some(out))
        })
    }
}
