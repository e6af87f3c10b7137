// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Wandelwerk.

use thiserror::Error;

/// Top-level error type for all Wandelwerk operations.
#[derive(Debug, Error)]
pub enum WandelwerkError {
    // -- Generation errors --
    /// Any failure inside a derivative generator, regardless of which tool
    /// or codec step failed. The originating error is kept as the cause so
    /// the failure stays diagnosable.
    #[error("derivative generation failed: {message}")]
    Generator {
        message: String,
        #[source]
        source: Option<Box<WandelwerkError>>,
    },

    /// Non-zero exit (or failed spawn) of an external tool. `stderr` holds
    /// the captured diagnostic text; a spawn failure or signal death is
    /// reported with status -1.
    #[error("{tool} failed with status {status}: {stderr}")]
    Tool {
        tool: String,
        status: i32,
        stderr: String,
    },

    // -- Codec / engine errors --
    #[error("image processing failed: {0}")]
    Image(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    // -- Storage / glue --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WandelwerkError {
    /// Wrap an inner failure into the single reportable generation kind.
    pub fn generation(message: impl Into<String>, source: WandelwerkError) -> Self {
        Self::Generator {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WandelwerkError>;
