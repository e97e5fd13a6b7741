//! Command-line flags.
//!
//! Flags override values read from `--config`; anything not given keeps the
//! file's (or the default) value.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{ServerConfig, TrailingSlashPolicy};

/// Serve a directory the way static hosts do: exact file, `.html`,
/// `/index.html`, then `404.html`. Zip archives along the path are browsable.
#[derive(Debug, Parser)]
#[command(name = "static-pages", version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Document root (overrides site.root).
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Address to listen on (overrides listener.bind_address).
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Do not mount zip archives under the root.
    #[arg(long)]
    pub no_archives: bool,

    /// Serve the not-found page for paths ending in '/'.
    #[arg(long)]
    pub reject_trailing_slash: bool,
}

impl Cli {
    /// Build the effective configuration: file, then flags, then validation.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let Cli {
            config: config_path,
            root,
            bind,
            no_archives,
            reject_trailing_slash,
        } = self;

        load_config(config_path.as_deref(), |config| {
            if let Some(root) = root {
                config.site.root = root;
            }
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
            }
            if no_archives {
                config.site.archives = false;
            }
            if reject_trailing_slash {
                config.site.trailing_slash = TrailingSlashPolicy::Reject;
            }
        })
    }
}
