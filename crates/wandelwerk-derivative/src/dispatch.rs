// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generator selection by MIME type — a fixed, ordered predicate table with a
// no-op fallback, so the allow-lists stay centrally auditable.

/// The strategy families the pipeline knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Image,
    Audio,
    Video,
    /// Fallback for everything else; produces no derivatives.
    Default,
}

/// MIME types handled by the image strategy. Preservation masters are
/// ingested as TIFF only; already-compressed formats are not re-derived.
pub const IMAGE_TYPES: &[&str] = &["image/tiff"];

/// The WAV family, in all the spellings ingest tools declare it.
pub const AUDIO_TYPES: &[&str] = &[
    "audio/wav",
    "audio/wave",
    "audio/x-wav",
    "audio/x-wave",
    "audio/x-pn-wav",
    "audio/vnd.wave",
];

/// MIME types handled by the video strategy.
pub const VIDEO_TYPES: &[&str] = &["video/quicktime"];

/// Ordered routing table, evaluated top to bottom.
const ROUTES: &[(fn(&str) -> bool, GeneratorKind)] = &[
    (is_image, GeneratorKind::Image),
    (is_audio, GeneratorKind::Audio),
    (is_video, GeneratorKind::Video),
];

fn is_image(media_type: &str) -> bool {
    IMAGE_TYPES.contains(&media_type)
}

fn is_audio(media_type: &str) -> bool {
    AUDIO_TYPES.contains(&media_type)
}

fn is_video(media_type: &str) -> bool {
    VIDEO_TYPES.contains(&media_type)
}

/// Pick the strategy for a MIME type. Total and deterministic: every input
/// maps to exactly one kind, unknown types fall through to `Default`, and
/// nothing here has side effects or error cases.
pub fn select(media_type: &str) -> GeneratorKind {
    ROUTES
        .iter()
        .find(|(applies, _)| applies(media_type))
        .map(|(_, kind)| *kind)
        .unwrap_or(GeneratorKind::Default)
}
