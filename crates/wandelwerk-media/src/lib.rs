// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wandelwerk-media — File lifecycle and media processing for the Wandelwerk
// derivative pipeline.
//
// Provides rewind-safe access to preservation masters (SourceFile), temp-backed
// output artifacts with guaranteed cleanup (DerivativeFile), in-process image
// transforms, and the argument-vector execution layer for external tools
// (vips, ffmpeg).

pub mod artifact;
pub mod image;
pub mod source;
pub mod tools;

// Re-export the primary structs so callers can use `wandelwerk_media::SourceFile` etc.
pub use artifact::DerivativeFile;
pub use source::SourceFile;
pub use tools::ffmpeg::MediaTranscoder;
pub use tools::vips::TiffTiler;
