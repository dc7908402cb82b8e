//! A pretend OAuth provider for trying the proxy locally.
//!
//! ```text
//! cargo run --example mock_provider
//! OAUTH_TOKEN_URL=http://127.0.0.1:8081/oauth/token \
//! USER_INFO_URL=http://127.0.0.1:8081/userinfo cargo run
//! curl -X POST -d 'grant_type=client_credentials' localhost:8080/proxy/oauth/token
//! curl 'localhost:8080/proxy/user-info?access_token=demo-token'
//! ```

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn token(body: String) -> Json<Value> {
    println!("token request: {body}");
    Json(json!({
        "access_token": "demo-token",
        "token_type": "bearer",
        "expires_in": 3600,
    }))
}

async fn user_info(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some("Bearer demo-token") => Ok(Json(json!({ "sub": "u1", "name": "Demo User" }))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/oauth/token", post(token))
        .route("/userinfo", get(user_info));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock OAuth provider listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
