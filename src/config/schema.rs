//! Configuration schema definitions.
//!
//! Every section derives Serde traits and falls back to defaults, so an
//! empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the static server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Document root and resolution behaviour.
    pub site: SiteConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// What to do with request paths ending in '/'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlashPolicy {
    /// Join normally; `/docs/` behaves like `/docs`.
    #[default]
    FallThrough,
    /// Skip resolution and serve the not-found page.
    Reject,
}

/// Status code sent along with the not-found page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundStatus {
    #[default]
    NotFound,
    /// 200, as plain file servers do when they find `404.html`.
    Ok,
}

/// Kind of an additional source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Plain,
    Archive,
}

/// An additional source consulted after the root.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub kind: SourceKind,

    /// Directory request paths are joined onto.
    pub root: PathBuf,
}

/// Document root and resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Document root. Always served first by a plain source.
    pub root: PathBuf,

    /// File under `root` served when nothing matches.
    pub not_found_page: String,

    pub not_found_status: NotFoundStatus,

    pub trailing_slash: TrailingSlashPolicy,

    /// Mount archives found under `root` (archive source right after the root).
    pub archives: bool,

    /// Archive extension, without the leading dot.
    pub archive_extension: String,

    /// Extra sources, consulted in order after the built-in ones.
    pub sources: Vec<SourceConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            not_found_page: "404.html".to_string(),
            not_found_status: NotFoundStatus::default(),
            trailing_slash: TrailingSlashPolicy::default(),
            archives: true,
            archive_extension: "zip".to_string(),
            sources: Vec::new(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address the exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "static_pages=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.site.root, PathBuf::from("."));
        assert!(config.site.archives);
        assert_eq!(config.site.trailing_slash, TrailingSlashPolicy::FallThrough);
        assert_eq!(config.site.not_found_status, NotFoundStatus::NotFound);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_parse_site_section() {
        let config: ServerConfig = toml::from_str(
            r#"
            [site]
            root = "public"
            trailing_slash = "reject"
            not_found_status = "ok"
            archives = false

            [[site.sources]]
            kind = "plain"
            root = "vendor"

            [[site.sources]]
            kind = "archive"
            root = "bundles"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.root, PathBuf::from("public"));
        assert_eq!(config.site.trailing_slash, TrailingSlashPolicy::Reject);
        assert_eq!(config.site.not_found_status, NotFoundStatus::Ok);
        assert!(!config.site.archives);
        assert_eq!(config.site.not_found_page, "404.html");
        assert_eq!(config.site.sources.len(), 2);
        assert_eq!(config.site.sources[1].kind, SourceKind::Archive);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<ServerConfig, _> = toml::from_str("[site]\ntrailing_slash = \"redirect\"\n");
        assert!(result.is_err());
    }
}
