//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, middleware)
//!     → request.rs (request ID assigned and echoed back)
//!     → resolve::Resolver::handle (blocking pool)
//!     → response.rs (Reply + request → ServeFile or buffered entry)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
