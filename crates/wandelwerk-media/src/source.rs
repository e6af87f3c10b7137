// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source-file access — rewind-safe reads over a preservation master and
// scoped temp-file materialization for tools that need a filesystem path.

use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::{debug, instrument};

use wandelwerk_core::error::Result;

/// Capability every preservation-master stream must satisfy. Callers may
/// hand in a `File`, an in-memory cursor, or anything else that can be
/// re-read from the start.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Wraps one readable, seekable master stream.
///
/// Stream position is never assumed to survive across calls: every read
/// rewinds to position zero first. Disk materializations are scoped to a
/// single operation and removed on every exit path.
pub struct SourceFile {
    inner: Box<dyn ReadSeek>,
}

impl SourceFile {
    pub fn new(inner: impl ReadSeek + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Open a master stored on the local filesystem.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Ok(Self::new(file))
    }

    /// Read the entire master into memory, starting from position zero.
    pub fn read(&mut self) -> Result<Vec<u8>> {
        self.inner.rewind()?;
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Materialize the master to a uniquely-named temp file and pass its
    /// path to `op`. The temp file is removed after `op` returns, whether it
    /// succeeds or fails — this is the only sanctioned way to hand a
    /// filesystem path to a tool wrapper.
    #[instrument(skip_all)]
    pub fn with_tmp_file<T>(&mut self, op: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
        let mut tmp = tempfile::Builder::new()
            .prefix("wandelwerk-src-")
            .tempfile()?;
        self.inner.rewind()?;
        io::copy(&mut self.inner, tmp.as_file_mut())?;
        debug!(path = %tmp.path().display(), "Master materialized to temp file");
        op(tmp.path())
        // `tmp` drops here — the file is unlinked on success and error alike.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_always_starts_from_position_zero() {
        let mut source = SourceFile::new(Cursor::new(b"master bytes".to_vec()));
        let first = source.read().unwrap();
        let second = source.read().unwrap();
        assert_eq!(first, b"master bytes");
        assert_eq!(first, second);
    }

    #[test]
    fn tmp_file_holds_the_full_master() {
        let mut source = SourceFile::new(Cursor::new(b"on disk".to_vec()));
        let contents = source
            .with_tmp_file(|path| Ok(std::fs::read(path)?))
            .unwrap();
        assert_eq!(contents, b"on disk");
    }

    #[test]
    fn tmp_file_is_removed_after_the_scope() {
        let mut source = SourceFile::new(Cursor::new(b"gone".to_vec()));
        let path = source
            .with_tmp_file(|path| Ok(path.to_path_buf()))
            .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn tmp_file_is_removed_when_the_operation_fails() {
        let mut source = SourceFile::new(Cursor::new(b"gone".to_vec()));
        let mut seen = None;
        let result: Result<()> = source.with_tmp_file(|path| {
            seen = Some(path.to_path_buf());
            Err(std::io::Error::other("boom").into())
        });
        assert!(result.is_err());
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn tmp_file_read_is_rewound_too() {
        let mut source = SourceFile::new(Cursor::new(b"twice".to_vec()));
        // Exhaust the stream once, then materialize — the copy must still
        // contain every byte.
        source.read().unwrap();
        let contents = source
            .with_tmp_file(|path| Ok(std::fs::read(path)?))
            .unwrap();
        assert_eq!(contents, b"twice");
    }
}
