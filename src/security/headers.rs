//! Header copying between the upstream and the client.
//!
//! Upstream headers are copied verbatim and additively, one entry per value,
//! so multi-value headers such as `Set-Cookie` survive. `Transfer-Encoding`
//! describes the upstream connection's framing and is left for the server to
//! negotiate with the client.

use axum::http::header::TRANSFER_ENCODING;
use axum::http::HeaderMap;

/// Append every upstream header value onto `to`.
pub fn copy_upstream_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if name == TRANSFER_ENCODING {
            continue;
        }
        to.append(name.clone(), value.clone());
    }
}
