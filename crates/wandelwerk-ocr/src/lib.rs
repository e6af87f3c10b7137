// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wandelwerk-ocr — OCR subsystem for the Wandelwerk derivative pipeline.
//
// Provides language-argument preparation (code expansion, supported-list
// filtering, vertical CJK handling) and a tesseract CLI wrapper producing
// plain-text, text-only-PDF, and hOCR sibling outputs.

pub mod engine;
pub mod language;

pub use engine::{OcrEngine, OcrSiblings};
pub use language::LanguagePreparer;
