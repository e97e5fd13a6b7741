//! Path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Request path (untrusted, percent-encoded)
//!     → path.rs (decode, lexical join onto a source's root)
//!     → engine.rs (for each source: exact → .html → /index.html)
//!     → source.rs (Source::exists, then Source::serve)
//!         → plain.rs   (regular files on disk)
//!         → archive.rs (entries inside a .zip found along the path)
//!     → Return: Resolution::Found or the not-found page
//! ```
//!
//! # Design Decisions
//! - Source list is built once and never mutated while serving
//! - Precedence is by source, then by candidate shape
//! - Only NotFound/PermissionDenied fall through; every other error aborts
//! - Filesystem paths use host separators, archive entry names always use '/'

pub mod archive;
pub mod engine;
pub mod path;
pub mod plain;
pub mod source;

pub use archive::ArchiveSource;
pub use engine::{Candidate, Outcome, Reply, Resolution, ResolveError, Resolver, ResolverOptions};
pub use plain::PlainSource;
pub use source::{Content, Payload, Source, SourceError};
