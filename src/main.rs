//! OAuth Provider Proxy
//!
//! A small reverse proxy built with Tokio and Axum that lets browsers call a
//! fixed OAuth provider's token and user-info endpoints.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────┐
//!                              │                 OAUTH PROXY                  │
//!     Client Request           │  ┌──────────┐    ┌────────────────────────┐  │
//!     ─────────────────────────┼─▶│  http    │───▶│ /proxy/oauth/token     │──┼──▶ Token
//!                              │  │  server  │    │ /proxy/user-info       │──┼──▶ User-info
//!                              │  └──────────┘    └───────────┬────────────┘  │     endpoints
//!     Client Response          │  ┌──────────┐                │               │
//!     ◀────────────────────────┼──│ response │◀───────────────┘               │
//!                              │  │ + CORS   │                                │
//!                              │  └──────────┘                                │
//!                              │  config · lifecycle · observability          │
//!                              └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use oauth_proxy::config::{
    load_config, load_env_file, missing_upstreams, validate_config, EnvFileStatus, ProxyConfig,
};
use oauth_proxy::http::HttpServer;
use oauth_proxy::lifecycle::{wait_for_signal, Shutdown};
use oauth_proxy::observability::init_logging;

#[derive(Parser)]
#[command(name = "oauth-proxy")]
#[command(about = "CORS-enabled proxy for an OAuth provider's token and user-info endpoints", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dotenv file preseeding OAUTH_TOKEN_URL and USER_INFO_URL.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Before anything reads the environment, including RUST_LOG.
    let env_file = load_env_file(&cli.env_file);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    config.apply_process_env();
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_level);

    tracing::info!("oauth-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    match env_file {
        EnvFileStatus::Loaded => {
            tracing::info!(path = %cli.env_file.display(), "Loaded environment file");
        }
        EnvFileStatus::NotFound => {
            tracing::warn!(
                path = %cli.env_file.display(),
                "Environment file not found, falling back to environment variables"
            );
        }
        EnvFileStatus::Invalid(e) => {
            tracing::warn!(path = %cli.env_file.display(), error = %e, "Ignoring unreadable environment file");
        }
    }

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "Invalid configuration");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }
    for var in missing_upstreams(&config) {
        tracing::warn!(variable = var, "Upstream URL not configured; its endpoint will answer 500");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        token_url = %config.upstream.token_url,
        user_info_url = %config.upstream.user_info_url,
        timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %config.listener.bind_address, error = %e, "Failed to bind listener");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let mut serve = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        res = &mut serve => res??,
        _ = wait_for_signal() => {
            shutdown.trigger();
            serve.await??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
