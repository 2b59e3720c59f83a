//! Qiita LINE bot - entry point.

use line_client::LineClient;
use qiita_bot::{build_router, create_router, AppState, Config};
use qiita_client::QiitaClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting Qiita LINE bot");

    // Initialize clients
    let qiita = match QiitaClient::new(
        &config.qiita.base_url,
        config.qiita.access_token.clone(),
        config.qiita.timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create Qiita client: {}", e);
            std::process::exit(1);
        }
    };

    if config.qiita.access_token.is_none() {
        info!("No Qiita access token configured, the anonymous rate limit applies");
    }

    let line = match LineClient::new(config.line.channel_access_token.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create LINE client: {}", e);
            std::process::exit(1);
        }
    };

    // Register commands once; the route table is immutable afterwards
    let router = match build_router(Arc::new(qiita)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to compile command patterns: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(router, line, config.line.channel_secret.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
