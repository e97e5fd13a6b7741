//! Plain filesystem source.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::resolve::source::{content_type_for, Content, Payload, Source, SourceError};

/// Serves regular files straight from disk.
#[derive(Debug, Clone)]
pub struct PlainSource {
    root: PathBuf,
}

impl PlainSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// True only for an existing regular file. Directories answer false.
pub(crate) fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

impl Source for PlainSource {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, candidate: &Path) -> bool {
        is_regular_file(candidate)
    }

    fn serve(&self, candidate: &Path) -> Result<Content, SourceError> {
        // Opened only to surface permission errors; the transport reopens it.
        let metadata = File::open(candidate)?.metadata()?;
        // Replaced by a directory since `exists`.
        if !metadata.is_file() {
            return Err(SourceError::NotFound);
        }

        Ok(Content {
            payload: Payload::File(candidate.to_path_buf()),
            content_type: content_type_for(candidate),
            len: metadata.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exists_only_for_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("page.html"), "<p>page</p>").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();

        let source = PlainSource::new(dir.path());
        assert!(source.exists(&dir.path().join("page.html")));
        assert!(!source.exists(&dir.path().join("docs")));
        assert!(!source.exists(&dir.path().join("missing.html")));
    }

    #[test]
    fn test_serve_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("style.css");
        fs::write(&path, "body {}").unwrap();

        let content = PlainSource::new(dir.path()).serve(&path).unwrap();
        assert_eq!(content.content_type.as_deref(), Some("text/css"));
        assert_eq!(content.len, 7);
        assert!(matches!(&content.payload, Payload::File(served) if *served == path));
        assert_eq!(content.into_bytes().unwrap(), b"body {}");
    }

    #[test]
    fn test_serve_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let err = PlainSource::new(dir.path())
            .serve(&dir.path().join("gone.html"))
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound));
    }

    #[test]
    fn test_serve_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = PlainSource::new(dir.path()).serve(dir.path()).unwrap_err();
        assert!(err.is_recoverable());
    }
}
