// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External-tool execution layer. Every invocation goes through `run_tool`:
// argument vectors only (no shell), stdout/stderr captured separately, and
// one failure kind for anything that exits non-zero.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use wandelwerk_core::error::{Result, WandelwerkError};

pub mod ffmpeg;
pub mod vips;

pub use ffmpeg::MediaTranscoder;
pub use vips::TiffTiler;

/// Run an external tool and wait for it to finish.
///
/// The call blocks the current thread for the duration of the subprocess.
/// A non-zero exit becomes a [`WandelwerkError::Tool`] carrying the captured
/// stderr; a failed spawn (missing binary) is reported the same way with
/// status -1. A failed invocation is permanent for this call — retry policy
/// belongs to the background job that asked for the derivative.
pub fn run_tool(tool: &str, program: &Path, args: &[OsString]) -> Result<Output> {
    debug!(tool, program = %program.display(), argc = args.len(), "Invoking external tool");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|err| WandelwerkError::Tool {
            tool: tool.to_string(),
            status: -1,
            stderr: format!("failed to spawn {}: {}", program.display(), err),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(tool, status = ?output.status.code(), "External tool failed");
        return Err(WandelwerkError::Tool {
            tool: tool.to_string(),
            // Signal death leaves no exit code; report it as -1.
            status: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    debug!(
        tool,
        stdout_len = output.stdout.len(),
        stderr_len = output.stderr.len(),
        "External tool finished"
    );
    Ok(output)
}
