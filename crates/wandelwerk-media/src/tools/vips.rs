// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// libvips wrapper — pyramidal tiled TIFF access copies for the image
// tile server.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use wandelwerk_core::config::AppConfig;
use wandelwerk_core::error::Result;

use super::run_tool;

/// Edge length of the fixed-size tiles inside the pyramid.
const TILE_PX: u32 = 256;

/// Wraps the `vips` CLI for producing tile-server-ready TIFFs.
#[derive(Debug, Clone)]
pub struct TiffTiler {
    vips: PathBuf,
}

impl TiffTiler {
    pub fn new(vips: impl Into<PathBuf>) -> Self {
        Self { vips: vips.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.vips_path.clone())
    }

    /// Re-encode `input` as an auto-rotated, pyramidal TIFF with 256×256
    /// JPEG-compressed tiles and stripped metadata, written to `output`.
    /// An existing file at `output` is overwritten.
    #[instrument(skip(self), fields(input = %input.display(), output = %output.display()))]
    pub fn pyramidal_tiff(&self, input: &Path, output: &Path) -> Result<()> {
        run_tool("vips", &self.vips, &pyramid_args(input, output))?;
        info!("Pyramidal TIFF written");
        Ok(())
    }
}

/// Argument vector for the pyramid conversion. The save options ride on the
/// output filename, which is vips CLI syntax — still a single argv element,
/// never interpreted by a shell.
fn pyramid_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut target: OsString = output.into();
    target.push(format!(
        "[tile,pyramid,compression=jpeg,tile-width={TILE_PX},tile-height={TILE_PX},strip]"
    ));
    vec!["autorot".into(), input.into(), target]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_args_carry_the_full_tile_policy() {
        let args = pyramid_args(Path::new("/in/master.tif"), Path::new("/out/access.tif"));
        assert_eq!(args[0], "autorot");
        assert_eq!(args[1], "/in/master.tif");
        let target = args[2].to_string_lossy();
        assert!(target.starts_with("/out/access.tif["));
        for option in [
            "tile",
            "pyramid",
            "compression=jpeg",
            "tile-width=256",
            "tile-height=256",
            "strip",
        ] {
            assert!(target.contains(option), "missing {option} in {target}");
        }
        assert_eq!(args.len(), 3);
    }
}
