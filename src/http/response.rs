//! Response construction.
//!
//! # Responsibilities
//! - Map a resolver `Reply` onto status, headers and body
//! - Hand files on disk to `ServeFile` so range and conditional requests work
//!
//! # Design Decisions
//! - Unknown content types send no `Content-Type` header at all
//! - The not-found page is always sent whole, with the resolver's status

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::resolve::{Outcome, Payload, Reply};

/// Request headers that would turn the not-found page into a 206 or 304.
const CONDITIONAL_HEADERS: [header::HeaderName; 6] = [
    header::RANGE,
    header::IF_RANGE,
    header::IF_MATCH,
    header::IF_NONE_MATCH,
    header::IF_MODIFIED_SINCE,
    header::IF_UNMODIFIED_SINCE,
];

/// Convert a resolver reply into an HTTP response for `request`.
pub async fn into_response(reply: Reply, request: Request) -> Response {
    let Some(content) = reply.content else {
        return reply.status.into_response();
    };

    let (mut response, represented) = match content.payload {
        Payload::File(path) => {
            let mut request = request;
            if reply.outcome != Outcome::Resolved {
                let headers = request.headers_mut();
                for name in CONDITIONAL_HEADERS {
                    headers.remove(name);
                }
            }

            let mut response = match ServeFile::new(&path).oneshot(request).await {
                Ok(response) => response.map(Body::new),
                Err(never) => match never {},
            };
            // 304s and `ServeFile` errors carry no representation.
            let represented = matches!(response.status(), StatusCode::OK | StatusCode::PARTIAL_CONTENT);
            if response.status() == StatusCode::OK {
                *response.status_mut() = reply.status;
            }
            (response, represented)
        }
        Payload::Bytes(bytes) => {
            let mut response = Body::from(bytes).into_response();
            *response.status_mut() = reply.status;
            response
                .headers_mut()
                .insert(header::CONTENT_LENGTH, HeaderValue::from(content.len));
            (response, true)
        }
    };

    if represented {
        let headers = response.headers_mut();
        match content
            .content_type
            .as_deref()
            .and_then(|content_type| HeaderValue::from_str(content_type).ok())
        {
            Some(value) => {
                headers.insert(header::CONTENT_TYPE, value);
            }
            None => {
                headers.remove(header::CONTENT_TYPE);
            }
        }
    }

    response
}
