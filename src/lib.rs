//! Local static-file server with static-host style path resolution.
//!
//! A request for `/docs` is answered by the first of `docs`, `docs.html` and
//! `docs/index.html` that exists, tried source by source, with `404.html` as
//! the last resort. Zip files along the path are served as directories.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resolve;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolve::{ArchiveSource, PlainSource, Resolver, Source};
