//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → cli.rs (command-line overrides)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → Resolver::from_config builds the source list once
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the source list never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, NotFoundStatus, ObservabilityConfig, ServerConfig, SiteConfig, SourceConfig,
    SourceKind, TimeoutConfig, TrailingSlashPolicy,
};
