//! `POST /proxy/oauth/token`: relay a form-encoded token request.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::Response;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::http::cors::preflight;
use crate::http::request::request_id;
use crate::http::response::{relay, ProxyError};
use crate::http::server::AppState;

pub const TOKEN_PATH: &str = "/proxy/oauth/token";

/// Forward the inbound body byte-for-byte to the configured token endpoint.
///
/// The inbound `Content-Type` and `Accept` are not forwarded; the upstream
/// always sees a form body and is asked for JSON.
pub async fn token_proxy(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ProxyError> {
    match *request.method() {
        Method::OPTIONS => return Ok(preflight()),
        Method::POST => {}
        _ => return Err(ProxyError::MethodNotAllowed),
    }

    let id = request_id(&request).to_owned();
    let body = axum::body::to_bytes(request.into_body(), state.max_body_size)
        .await
        .map_err(|e| {
            tracing::debug!(request_id = %id, error = %e, "Failed to read token request body");
            ProxyError::BodyRead(e)
        })?;

    let outbound = state
        .client
        .post(state.upstream.token_url.as_str())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT, "application/json")
        .body(body)
        .build()
        .map_err(|e| {
            tracing::warn!(request_id = %id, error = %e, "Invalid token proxy request");
            ProxyError::BuildRequest(e)
        })?;

    tracing::debug!(request_id = %id, upstream = %outbound.url(), "Forwarding token request");

    let upstream = state.execute_detached(outbound).await.map_err(|e| {
        tracing::warn!(request_id = %id, error = %e, "Token upstream unreachable");
        ProxyError::Forward(e)
    })?;

    tracing::debug!(request_id = %id, status = %upstream.status(), "Token upstream responded");
    Ok(relay(upstream))
}
