//! Path normalization.
//!
//! Two separate functions on purpose: [`join_request_path`] builds host
//! filesystem paths, [`entry_name`] builds archive entry names, which are
//! always '/'-separated whatever the host OS.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Percent-decode a raw URL path. Invalid UTF-8 is replaced, not rejected.
pub fn decode_request_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Join an untrusted request path onto `base`.
///
/// Lexical only: empty and `.` segments are dropped, `..` pops the previous
/// segment and never climbs above `base`. The filesystem is not consulted.
pub fn join_request_path(base: &Path, request_path: &str) -> PathBuf {
    let mut segments: Vec<&str> = Vec::new();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut joined = base.to_path_buf();
    joined.extend(segments);
    joined
}

/// A candidate split at its archive mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    /// Path up to and including the archive segment.
    pub archive: PathBuf,
    /// Remainder of the path as an archive entry name.
    pub entry: String,
}

/// Split `candidate` at the first segment whose extension is `extension`.
///
/// `extension` is given without the leading dot. Returns `None` when no
/// segment qualifies.
pub fn split_mount_point(candidate: &Path, extension: &str) -> Option<MountPoint> {
    let mut archive = PathBuf::new();
    let mut components = candidate.components();

    while let Some(component) = components.next() {
        archive.push(component.as_os_str());
        if let Component::Normal(segment) = component {
            let is_archive = Path::new(segment)
                .extension()
                .is_some_and(|ext| ext == extension);
            if is_archive {
                return Some(MountPoint {
                    archive,
                    entry: entry_name(components),
                });
            }
        }
    }

    None
}

/// Build a forward-slash archive entry name from path components.
pub fn entry_name<'a>(components: impl Iterator<Item = Component<'a>>) -> String {
    components
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
