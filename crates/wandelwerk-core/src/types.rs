// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Wandelwerk derivative pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a preservation asset, used in logs and reports.
/// The record layer owns the asset itself; this core only labels work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub Uuid);

impl AssetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-asset OCR configuration, recorded alongside the asset by the
/// external persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Requested language codes in priority order. Blank entries are
    /// tolerated and dropped during preparation.
    pub languages: Vec<String>,
    /// Viewing-direction hint. CJK material is assumed vertically laid out
    /// unless this is exactly "left-to-right".
    pub viewing_direction: Option<String>,
}

impl OcrSettings {
    pub fn new(languages: Vec<String>, viewing_direction: Option<String>) -> Self {
        Self {
            languages,
            viewing_direction,
        }
    }
}
