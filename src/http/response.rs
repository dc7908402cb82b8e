//! Response handling: relaying upstream responses and rendering errors.
//!
//! # Responsibilities
//! - Copy upstream status, headers and body to the client unmodified
//! - Add CORS headers to every response the proxy produces
//! - Map local and upstream failures to plain-text status responses
//!
//! # Design Decisions
//! - The upstream body is streamed, never buffered; the stream owns the
//!   upstream response, so dropping it releases the connection on every path
//! - Upstream failures are not distinguished by cause; all map to 502

use axum::body::Body;
use axum::http::header::X_CONTENT_TYPE_OPTIONS;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::cors::apply_cors;
use crate::security::headers::copy_upstream_headers;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can stop a request before the upstream answer is relayed.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Error reading request body")]
    BodyRead(#[source] axum::Error),

    #[error("Missing access token")]
    MissingAccessToken,

    /// The outbound request could not be built (bad upstream URL or header value).
    #[error("Error creating proxy request")]
    BuildRequest(#[source] reqwest::Error),

    /// DNS, connect, timeout, or any other transport failure.
    #[error("Error forwarding request")]
    Forward(#[source] BoxError),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::BodyRead(_) | ProxyError::MissingAccessToken => StatusCode::BAD_REQUEST,
            ProxyError::BuildRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Forward(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), format!("{self}\n")).into_response();
        let headers = response.headers_mut();
        headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        apply_cors(headers);
        response
    }
}

/// Turn an upstream response into the client response.
///
/// CORS headers are set first and upstream headers appended after them, so an
/// upstream that sends its own CORS headers produces both values.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();

    let mut headers = HeaderMap::with_capacity(upstream.headers().len() + 3);
    apply_cors(&mut headers);
    copy_upstream_headers(upstream.headers(), &mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
