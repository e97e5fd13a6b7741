//! Archive-backed source.
//!
//! Any path segment ending in the archive extension is treated as a mounted
//! sub-filesystem: `site/archive.zip/public/index.html` reads the entry
//! `public/index.html` from `site/archive.zip`.
//!
//! Containers are opened per request and dropped before `serve` returns.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::resolve::path::{split_mount_point, MountPoint};
use crate::resolve::plain::is_regular_file;
use crate::resolve::source::{content_type_for, Content, Source, SourceError};

/// Serves entries out of zip files found along the candidate path.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    root: PathBuf,
    extension: String,
}

impl ArchiveSource {
    pub const DEFAULT_EXTENSION: &'static str = "zip";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different archive extension (no leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Only segments below the root can mount an archive, so a root that
    /// itself lives under `something.zip/` still works.
    fn mount_point(&self, candidate: &Path) -> Option<MountPoint> {
        let relative = candidate.strip_prefix(&self.root).ok()?;
        let mount = split_mount_point(relative, &self.extension)?;
        Some(MountPoint {
            archive: self.root.join(mount.archive),
            entry: mount.entry,
        })
    }
}

impl Source for ArchiveSource {
    fn name(&self) -> &'static str {
        "archive"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, candidate: &Path) -> bool {
        self.mount_point(candidate)
            .is_some_and(|mount| is_regular_file(&mount.archive))
    }

    fn serve(&self, candidate: &Path) -> Result<Content, SourceError> {
        let mount = self.mount_point(candidate).ok_or(SourceError::NotFound)?;
        read_entry(&mount.archive, &mount.entry)
    }
}

fn read_entry(archive: &Path, name: &str) -> Result<Content, SourceError> {
    if name.is_empty() {
        return Err(SourceError::NotFound);
    }

    let file = File::open(archive)?;
    let mut container = ZipArchive::new(file)?;
    let mut entry = container.by_name(name)?;
    if entry.is_dir() {
        return Err(SourceError::NotFound);
    }

    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;

    tracing::trace!(
        archive = %archive.display(),
        entry = name,
        size = bytes.len(),
        "Archive entry read"
    );

    Ok(Content::bytes(bytes, content_type_for(Path::new(name))))
}

impl From<ZipError> for SourceError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(err) => err.into(),
            ZipError::FileNotFound => SourceError::NotFound,
            other => SourceError::Other(io::Error::new(io::ErrorKind::InvalidData, other)),
        }
    }
}
