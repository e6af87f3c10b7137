// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wandelwerk-derivative — Strategy selection and derivative generation for
// preservation masters.
//
// One generator per supported media family (TIFF images, the WAV family,
// QuickTime video), a fallback that produces nothing, and a facade binding an
// asset's master stream to whichever strategy its MIME type selects.

pub mod dispatch;
pub mod facade;
pub mod generate;

pub use dispatch::GeneratorKind;
pub use facade::{Asset, Derivatives};
pub use generate::{Generator, OcrDerivatives};
