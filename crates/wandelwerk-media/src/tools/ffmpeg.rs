// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ffmpeg wrapper — audio/video access copies and representative-frame
// extraction.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use wandelwerk_core::config::AppConfig;
use wandelwerk_core::error::{Result, WandelwerkError};

use super::run_tool;

/// MP3 VBR quality scale (~128 kbps).
const MP3_QUALITY: &str = "5";

/// Wraps the `ffmpeg` CLI for the transcoding the pipeline needs.
#[derive(Debug, Clone)]
pub struct MediaTranscoder {
    ffmpeg: PathBuf,
}

impl MediaTranscoder {
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.ffmpeg_path.clone())
    }

    /// Transcode a WAV-family master to an MP3 access copy: quality scale 5,
    /// metadata stripped, forced 2-channel output, existing output
    /// overwritten.
    #[instrument(skip(self), fields(input = %input.display(), output = %output.display()))]
    pub fn wav_to_mp3(&self, input: &Path, output: &Path) -> Result<()> {
        run_tool("ffmpeg", &self.ffmpeg, &mp3_args(input, output))?;
        info!("MP3 access copy written");
        Ok(())
    }

    /// Transcode a QuickTime master to an MP4 access copy with H.264 video
    /// and AAC audio, overwriting any existing output.
    #[instrument(skip(self), fields(input = %input.display(), output = %output.display()))]
    pub fn mov_to_mp4(&self, input: &Path, output: &Path) -> Result<()> {
        run_tool("ffmpeg", &self.ffmpeg, &mp4_args(input, output))?;
        info!("MP4 access copy written");
        Ok(())
    }

    /// Extract one representative frame, chosen by ffmpeg's `thumbnail`
    /// scene-selection filter, and return the encoded image bytes captured
    /// from the pipe.
    #[instrument(skip(self), fields(input = %input.display()))]
    pub fn representative_frame(&self, input: &Path) -> Result<Vec<u8>> {
        let output = run_tool("ffmpeg", &self.ffmpeg, &frame_args(input))?;
        if output.stdout.is_empty() {
            return Err(WandelwerkError::Tool {
                tool: "ffmpeg".to_string(),
                status: 0,
                stderr: "no frame data on stdout".to_string(),
            });
        }
        info!(bytes = output.stdout.len(), "Representative frame extracted");
        Ok(output.stdout)
    }
}

fn mp3_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-map_metadata".into(),
        "-1".into(),
        "-q:a".into(),
        MP3_QUALITY.into(),
        "-ac".into(),
        "2".into(),
        output.into(),
    ]
}

fn mp4_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-c:v".into(),
        "libx264".into(),
        "-c:a".into(),
        "aac".into(),
        output.into(),
    ]
}

fn frame_args(input: &Path) -> Vec<OsString> {
    vec![
        "-i".into(),
        input.into(),
        "-vf".into(),
        "thumbnail".into(),
        "-frames:v".into(),
        "1".into(),
        "-q:v".into(),
        "2".into(),
        "-f".into(),
        "image2pipe".into(),
        "-vcodec".into(),
        "mjpeg".into(),
        "-".into(),
    ]
}
