// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fallback strategy for MIME types outside the allow-lists.

use wandelwerk_core::error::Result;
use wandelwerk_media::DerivativeFile;

use super::Generator;

/// Produces no derivatives. An unsupported type is a valid terminal state,
/// not an error — the asset simply keeps only its preservation master.
pub struct DefaultGenerator;

impl Generator for DefaultGenerator {
    fn thumbnail(&mut self) -> Result<Option<DerivativeFile>> {
        Ok(None)
    }

    fn access(&mut self) -> Result<Option<DerivativeFile>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_nothing_without_error() {
        let mut generator = DefaultGenerator;
        assert!(generator.thumbnail().unwrap().is_none());
        assert!(generator.access().unwrap().is_none());
    }
}
