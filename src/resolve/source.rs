//! The capability every resolution strategy implements.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a source could not serve a candidate.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Nothing at the candidate. Resolution moves on.
    #[error("resource not found")]
    NotFound,

    /// The candidate exists but cannot be read. Treated like `NotFound`.
    #[error("permission denied")]
    PermissionDenied,

    /// Unexpected I/O failure or a corrupt container. Aborts the request.
    #[error("{0}")]
    Other(io::Error),
}

impl SourceError {
    /// Returns true when resolution may continue with the next candidate.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SourceError::NotFound | SourceError::PermissionDenied)
    }
}

impl From<io::Error> for SourceError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound,
            io::ErrorKind::PermissionDenied => SourceError::PermissionDenied,
            _ => SourceError::Other(err),
        }
    }
}

/// Where the bytes of a served resource come from.
#[derive(Debug)]
pub enum Payload {
    /// A file on disk. The transport serves it, honouring range and
    /// conditional request headers.
    File(PathBuf),
    /// Bytes already in memory (e.g. a decompressed archive entry).
    Bytes(Vec<u8>),
}

/// A resource a source agreed to serve.
#[derive(Debug)]
pub struct Content {
    pub payload: Payload,
    /// `None` when the extension is unknown; no header is sent in that case.
    pub content_type: Option<String>,
    pub len: u64,
}

impl Content {
    /// Content backed by an in-memory buffer.
    pub fn bytes(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            len: bytes.len() as u64,
            payload: Payload::Bytes(bytes),
            content_type,
        }
    }

    /// Read the payload into memory.
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        match self.payload {
            Payload::Bytes(bytes) => Ok(bytes),
            Payload::File(path) => fs::read(path),
        }
    }
}

/// Content type for a file name, from the standard extension table.
pub fn content_type_for(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|mime| mime.to_string())
}

/// A pluggable strategy that can test for and serve candidate paths.
///
/// The engine joins each request onto [`Source::root`] and hands the
/// resulting candidates to `exists` and `serve`, in that order. `exists`
/// must stay cheap: it runs for every candidate of every request.
pub trait Source: Send + Sync + fmt::Debug {
    /// Short label used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Directory request paths are joined onto.
    fn root(&self) -> &Path;

    /// Returns true if this source believes it can serve `candidate`.
    fn exists(&self, candidate: &Path) -> bool;

    /// Check `candidate` is readable and describe it for serving.
    fn serve(&self, candidate: &Path) -> Result<Content, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_classified() {
        let err: SourceError = io::Error::from(io::ErrorKind::NotFound).into();
        assert!(matches!(err, SourceError::NotFound));

        let err: SourceError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, SourceError::PermissionDenied));
        assert!(err.is_recoverable());

        let err: SourceError = io::Error::from(io::ErrorKind::InvalidData).into();
        assert!(matches!(err, SourceError::Other(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_content_type_lookup() {
        assert_eq!(
            content_type_for(Path::new("public/index.html")).as_deref(),
            Some("text/html")
        );
        assert_eq!(content_type_for(Path::new("style.css")).as_deref(), Some("text/css"));
        assert_eq!(content_type_for(Path::new("blob.nosuchext")), None);
        assert_eq!(content_type_for(Path::new("README")), None);
    }

    #[test]
    fn test_bytes_content_len() {
        let content = Content::bytes(b"hello".to_vec(), None);
        assert_eq!(content.len, 5);
        assert_eq!(content.into_bytes().unwrap(), b"hello");
    }
}
