//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hand every request to the resolver on the blocking pool
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::response::into_response;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::resolve::Resolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

/// HTTP front end for a [`Resolver`].
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let resolver = Resolver::from_config(&config.site);
        Self::with_resolver(config, resolver)
    }

    /// Create a server around a resolver assembled by the caller.
    pub fn with_resolver(config: ServerConfig, resolver: Resolver) -> Self {
        tracing::info!(
            root = %resolver.root().display(),
            sources = ?resolver.sources().map(|s| s.name()).collect::<Vec<_>>(),
            "Resolver ready"
        );

        let state = AppState {
            resolver: Arc::new(resolver),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(static_handler))
            .route("/{*path}", any(static_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.config.site.root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Catch-all handler: every method and path goes through the resolver.
///
/// The request itself is kept for the response stage, where file bodies see
/// its range and conditional headers.
async fn static_handler(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let method_str = method.to_string();
    let path = request.uri().path().to_string();

    let resolver = Arc::clone(&state.resolver);
    let request_path = path.clone();
    let result = tokio::task::spawn_blocking(move || resolver.handle(&method, &request_path)).await;

    match result {
        Ok(Ok(reply)) => {
            let outcome = reply.outcome;
            let response = into_response(reply, request).await;
            metrics::record_request(&method_str, response.status().as_u16(), outcome.as_str(), start_time);
            response
        }
        Ok(Err(e)) => {
            tracing::error!(method = %method_str, path = %path, error = %e, "Request aborted");
            metrics::record_request(&method_str, 500, "fatal", start_time);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            tracing::error!(method = %method_str, path = %path, error = %e, "Resolver task failed");
            metrics::record_request(&method_str, 500, "fatal", start_time);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
