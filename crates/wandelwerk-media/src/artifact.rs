// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Derivative artifacts — temp-backed output files produced by the generators.
// Ownership transfers to the caller at return time; the caller streams the
// bytes to persistent storage and then releases the artifact.

use std::io::{self, Read, Seek, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;

use wandelwerk_core::error::Result;

/// A transient derivative: a backing temp file plus the metadata the
/// repository layer needs to persist it (MIME type and IIIF flags).
///
/// The backing file is unlinked when the artifact is dropped, so a caller
/// that forgets to call [`cleanup`](Self::cleanup) leaks nothing. `cleanup`
/// consumes the value, which makes any access after release a compile
/// error rather than a runtime one.
#[derive(Debug)]
pub struct DerivativeFile {
    media_type: String,
    iiif_image: bool,
    iiif_manifest: bool,
    file: NamedTempFile,
}

impl DerivativeFile {
    /// Allocate an empty backing temp file for a derivative of the given
    /// MIME type. `extension` becomes the temp-file suffix so tools that
    /// sniff by name behave.
    pub fn new(media_type: impl Into<String>, extension: Option<&str>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("wandelwerk-deriv-");
        let suffix;
        if let Some(ext) = extension {
            suffix = format!(".{ext}");
            builder.suffix(&suffix);
        }
        let file = builder.tempfile()?;
        debug!(path = %file.path().display(), "Derivative artifact allocated");
        Ok(Self {
            media_type: media_type.into(),
            iiif_image: false,
            iiif_manifest: false,
            file,
        })
    }

    // -- Flags (consume self, return new Self) --------------------------------

    /// Mark this artifact as the pyramidal access copy served by the image
    /// tile server.
    pub fn iiif_image(mut self, flag: bool) -> Self {
        self.iiif_image = flag;
        self
    }

    /// Reserved for manifest-type derivatives produced elsewhere in the
    /// repository.
    pub fn iiif_manifest(mut self, flag: bool) -> Self {
        self.iiif_manifest = flag;
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn is_iiif_image(&self) -> bool {
        self.iiif_image
    }

    pub fn is_iiif_manifest(&self) -> bool {
        self.iiif_manifest
    }

    /// Path of the backing file, for tools that write into the artifact.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Current length of the backing file in bytes.
    pub fn len(&self) -> Result<u64> {
        Ok(self.file.as_file().metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // -- Content --------------------------------------------------------------

    /// Write the full derivative content into the backing file.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self.file.as_file_mut();
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }

    /// Read the full derivative content, starting from position zero.
    pub fn read(&mut self) -> Result<Vec<u8>> {
        let file = self.file.as_file_mut();
        file.rewind()?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// SHA-256 fixity digest of the derivative bytes, hex-encoded. Recorded
    /// by the repository layer next to the persisted copy.
    pub fn sha256_hex(&mut self) -> Result<String> {
        let file = self.file.as_file_mut();
        file.rewind()?;
        let mut hasher = Sha256::new();
        io::copy(file, &mut hasher)?;
        Ok(hex::encode(hasher.finalize()))
    }

    // -- Release --------------------------------------------------------------

    /// Close and remove the backing file. Dropping the artifact has the same
    /// effect; this form surfaces removal errors.
    pub fn cleanup(self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_content() {
        let mut artifact = DerivativeFile::new("image/jpeg", Some("jpg")).unwrap();
        artifact.write_all(b"jpeg bytes").unwrap();
        assert_eq!(artifact.read().unwrap(), b"jpeg bytes");
        assert_eq!(artifact.len().unwrap(), 10);
        assert!(!artifact.is_empty().unwrap());
    }

    #[test]
    fn flags_default_to_false() {
        let artifact = DerivativeFile::new("image/tiff", None).unwrap();
        assert!(!artifact.is_iiif_image());
        assert!(!artifact.is_iiif_manifest());
        assert_eq!(artifact.media_type(), "image/tiff");
    }

    #[test]
    fn flags_are_chainable() {
        let artifact = DerivativeFile::new("image/tiff", Some("tif"))
            .unwrap()
            .iiif_image(true);
        assert!(artifact.is_iiif_image());
        assert!(!artifact.is_iiif_manifest());
    }

    #[test]
    fn extension_shows_up_in_the_backing_path() {
        let artifact = DerivativeFile::new("audio/mpeg", Some("mp3")).unwrap();
        assert_eq!(
            artifact.path().extension().and_then(|e| e.to_str()),
            Some("mp3")
        );
    }

    #[test]
    fn cleanup_removes_the_backing_file() {
        let artifact = DerivativeFile::new("text/plain", Some("txt")).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());
        artifact.cleanup().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_the_backing_file_too() {
        let path = {
            let artifact = DerivativeFile::new("text/plain", None).unwrap();
            artifact.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn fixity_digest_matches_known_vector() {
        let mut artifact = DerivativeFile::new("text/plain", Some("txt")).unwrap();
        artifact.write_all(b"hello").unwrap();
        assert_eq!(
            artifact.sha256_hex().unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
