//! Resolution engine.
//!
//! # Responsibilities
//! - Own the root directory and the ordered source list
//! - Generate candidates (exact, `.html`, `/index.html`) per source
//! - Fall back to the not-found page served from the root
//! - Gate methods: GET resolves, HEAD/OPTIONS are empty probes
//!
//! # Design Decisions
//! - A plain source over the root is always consulted first
//! - Every candidate shape is tried, even for paths with an extension
//! - The not-found page ignores configured sources

use std::path::{Path, PathBuf};

use axum::http::{Method, StatusCode};
use thiserror::Error;

use crate::config::schema::{NotFoundStatus, SiteConfig, SourceKind, TrailingSlashPolicy};
use crate::resolve::archive::ArchiveSource;
use crate::resolve::path::{decode_request_path, join_request_path};
use crate::resolve::plain::PlainSource;
use crate::resolve::source::{Content, Source, SourceError};

/// Candidate shapes, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// The joined path as-is.
    Exact,
    /// `<path>.html`
    HtmlSuffix,
    /// `<path>/index.html`
    IndexFile,
}

impl Candidate {
    pub const ORDER: [Candidate; 3] = [Candidate::Exact, Candidate::HtmlSuffix, Candidate::IndexFile];

    /// Derive this candidate from the joined base path.
    pub fn apply(self, base: &Path) -> PathBuf {
        match self {
            Candidate::Exact => base.to_path_buf(),
            Candidate::HtmlSuffix => {
                let mut path = base.as_os_str().to_owned();
                path.push(".html");
                PathBuf::from(path)
            }
            Candidate::IndexFile => base.join("index.html"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Candidate::Exact => "exact",
            Candidate::HtmlSuffix => "html_suffix",
            Candidate::IndexFile => "index_file",
        }
    }
}

/// Tunables that do not change the source list.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub not_found_page: String,
    pub not_found_status: NotFoundStatus,
    pub trailing_slash: TrailingSlashPolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            not_found_page: "404.html".to_string(),
            not_found_status: NotFoundStatus::default(),
            trailing_slash: TrailingSlashPolicy::default(),
        }
    }
}

/// Result of resolving a request path.
#[derive(Debug)]
pub enum Resolution {
    /// One source satisfied one candidate.
    Found {
        source: &'static str,
        candidate: Candidate,
        path: PathBuf,
        content: Content,
    },
    /// Nothing matched. Carries the not-found page if the root has one.
    NotFound(Option<Content>),
}

/// Request-aborting failure.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{origin} source failed on {}: {error}", .path.display())]
    Fatal {
        origin: &'static str,
        path: PathBuf,
        #[source]
        error: SourceError,
    },
}

/// How a request was answered, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    NotFoundPage,
    Missing,
    Probe,
    MethodNotAllowed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Resolved => "resolved",
            Outcome::NotFoundPage => "not_found_page",
            Outcome::Missing => "missing",
            Outcome::Probe => "probe",
            Outcome::MethodNotAllowed => "method_not_allowed",
        }
    }
}

/// Transport-independent answer to a request.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub outcome: Outcome,
    /// `None` means an empty body with no content headers.
    pub content: Option<Content>,
}

impl Reply {
    fn empty(status: StatusCode, outcome: Outcome) -> Self {
        Self {
            status,
            outcome,
            content: None,
        }
    }

    /// Body used when the root has no not-found page.
    fn missing() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            outcome: Outcome::Missing,
            content: Some(Content::bytes(
                b"404 page not found\n".to_vec(),
                Some("text/plain; charset=utf-8".to_string()),
            )),
        }
    }
}

/// Root directory plus the ordered source list.
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
    /// Serves the not-found page; also the head of `sources`.
    fallback: PlainSource,
    sources: Vec<Box<dyn Source>>,
    options: ResolverOptions,
}

impl Resolver {
    /// Resolver with only the implicit plain source over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let fallback = PlainSource::new(root.clone());
        Self {
            sources: vec![Box::new(fallback.clone())],
            fallback,
            root,
            options: ResolverOptions::default(),
        }
    }

    /// Build the resolver described by the site configuration.
    pub fn from_config(site: &SiteConfig) -> Self {
        let mut resolver = Self::new(site.root.clone()).with_options(ResolverOptions {
            not_found_page: site.not_found_page.clone(),
            not_found_status: site.not_found_status,
            trailing_slash: site.trailing_slash,
        });

        if site.archives {
            resolver.push_source(Box::new(
                ArchiveSource::new(site.root.clone()).with_extension(site.archive_extension.clone()),
            ));
        }

        for source in &site.sources {
            let source: Box<dyn Source> = match source.kind {
                SourceKind::Plain => Box::new(PlainSource::new(source.root.clone())),
                SourceKind::Archive => Box::new(
                    ArchiveSource::new(source.root.clone())
                        .with_extension(site.archive_extension.clone()),
                ),
            };
            resolver.push_source(source);
        }

        resolver
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a source after all existing ones.
    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.push_source(Box::new(source));
        self
    }

    pub fn push_source(&mut self, source: Box<dyn Source>) {
        self.sources.push(source);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Effective source list, implicit plain source first.
    pub fn sources(&self) -> impl Iterator<Item = &(dyn Source + 'static)> + '_ {
        self.sources.iter().map(|source| source.as_ref())
    }

    /// Answer a request: method gate, resolution, not-found status policy.
    pub fn handle(&self, method: &Method, request_path: &str) -> Result<Reply, ResolveError> {
        if method == Method::HEAD || method == Method::OPTIONS {
            return Ok(Reply::empty(StatusCode::OK, Outcome::Probe));
        }
        if method != Method::GET {
            return Ok(Reply::empty(StatusCode::METHOD_NOT_ALLOWED, Outcome::MethodNotAllowed));
        }

        let reply = match self.resolve(request_path)? {
            Resolution::Found { content, .. } => Reply {
                status: StatusCode::OK,
                outcome: Outcome::Resolved,
                content: Some(content),
            },
            Resolution::NotFound(Some(page)) => Reply {
                status: match self.options.not_found_status {
                    NotFoundStatus::NotFound => StatusCode::NOT_FOUND,
                    NotFoundStatus::Ok => StatusCode::OK,
                },
                outcome: Outcome::NotFoundPage,
                content: Some(page),
            },
            Resolution::NotFound(None) => Reply::missing(),
        };
        Ok(reply)
    }

    /// Run the candidate chain for a request path.
    pub fn resolve(&self, request_path: &str) -> Result<Resolution, ResolveError> {
        let request_path = decode_request_path(request_path);

        if self.options.trailing_slash == TrailingSlashPolicy::Reject
            && request_path.len() > 1
            && request_path.ends_with('/')
        {
            tracing::debug!(path = %request_path, "Trailing separator rejected");
            return self.not_found();
        }

        for source in self.sources() {
            let base = join_request_path(source.root(), &request_path);

            for candidate in Candidate::ORDER {
                // `<root>.html` would sit outside the root.
                if candidate == Candidate::HtmlSuffix && base.as_path() == source.root() {
                    continue;
                }

                let path = candidate.apply(&base);
                if !source.exists(&path) {
                    continue;
                }

                match source.serve(&path) {
                    Ok(content) => {
                        tracing::debug!(
                            source = source.name(),
                            candidate = candidate.as_str(),
                            path = %path.display(),
                            "Resolved"
                        );
                        return Ok(Resolution::Found {
                            source: source.name(),
                            candidate,
                            path,
                            content,
                        });
                    }
                    Err(error) if error.is_recoverable() => {
                        tracing::debug!(
                            source = source.name(),
                            path = %path.display(),
                            %error,
                            "Candidate not servable, continuing"
                        );
                    }
                    Err(error) => {
                        return Err(ResolveError::Fatal {
                            origin: source.name(),
                            path,
                            error,
                        });
                    }
                }
            }
        }

        tracing::info!(path = %request_path, "No candidate matched, serving not-found page");
        self.not_found()
    }

    fn not_found(&self) -> Result<Resolution, ResolveError> {
        let page = self.root.join(&self.options.not_found_page);
        if !self.fallback.exists(&page) {
            return Ok(Resolution::NotFound(None));
        }

        match self.fallback.serve(&page) {
            Ok(content) => Ok(Resolution::NotFound(Some(content))),
            Err(error) if error.is_recoverable() => Ok(Resolution::NotFound(None)),
            Err(error) => Err(ResolveError::Fatal {
                origin: self.fallback.name(),
                path: page,
                error,
            }),
        }
    }
}
