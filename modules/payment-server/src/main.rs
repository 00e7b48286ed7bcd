use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payment_server::{config, router, AppState};

#[derive(Parser)]
#[command(name = "payment-server", about = "Simulated payment service")]
struct Cli {
    /// Path to config TOML file; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PAYMENT_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut file_config = match &cli.config {
        Some(path) => {
            info!(config = %path.display(), "Loading config");
            config::load_config(path)?
        }
        None => config::FileConfig::default(),
    };
    file_config.apply_env()?;
    if let Some(port) = cli.port {
        file_config.server.port = port;
    }

    let state = Arc::new(AppState::from_config(&file_config));
    info!(
        ledger = %state.ledger.path().display(),
        cards = file_config.payments.approved_cards.len(),
        max_limit = file_config.payments.max_limit,
        "Payment ledger ready"
    );

    let app = router(state, file_config.server.static_dir.as_deref()).layer(
        tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            },
        ),
    );

    let addr = format!("{}:{}", file_config.server.host, file_config.server.port);
    info!("Payment server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down payment server");
        })
        .await?;

    info!("Payment server stopped");
    Ok(())
}
