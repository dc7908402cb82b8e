//! `GET /proxy/user-info?access_token=...`: relay a bearer-authenticated
//! user-info lookup.

use axum::extract::{Request, State};
use axum::http::{Method, Uri};
use axum::response::Response;
use reqwest::header::AUTHORIZATION;

use crate::http::cors::preflight;
use crate::http::request::request_id;
use crate::http::response::{relay, ProxyError};
use crate::http::server::AppState;

pub const USER_INFO_PATH: &str = "/proxy/user-info";

const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Forward the query's access token as a bearer credential. No upstream call
/// is made when the token is missing or empty.
pub async fn user_info_proxy(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ProxyError> {
    match *request.method() {
        Method::OPTIONS => return Ok(preflight()),
        Method::GET => {}
        _ => return Err(ProxyError::MethodNotAllowed),
    }

    let token = access_token(request.uri()).ok_or(ProxyError::MissingAccessToken)?;
    let id = request_id(&request).to_owned();

    let outbound = state
        .client
        .get(state.upstream.user_info_url.as_str())
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .build()
        .map_err(|e| {
            tracing::warn!(request_id = %id, error = %e, "Invalid user-info proxy request");
            ProxyError::BuildRequest(e)
        })?;

    tracing::debug!(request_id = %id, upstream = %outbound.url(), "Forwarding user-info request");

    let upstream = state.execute_detached(outbound).await.map_err(|e| {
        tracing::warn!(request_id = %id, error = %e, "User-info upstream unreachable");
        ProxyError::Forward(e)
    })?;

    tracing::debug!(request_id = %id, status = %upstream.status(), "User-info upstream responded");
    Ok(relay(upstream))
}

/// First value of `access_token`, percent-decoded. An empty value counts as
/// absent.
fn access_token(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ACCESS_TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
