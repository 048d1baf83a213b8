use std::sync::Arc;

use clap::Parser;
use faultline_core::{FaultlineConfig, MemoryStore};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use faultline_server::crash::CrashBoundary;
use faultline_server::dashboard::DashboardState;
use faultline_server::http;
use faultline_server::render::HtmlRenderer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "faultline.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Load config
    let config = match FaultlineConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // The demo host runs on the in-process reference store; production hosts
    // inject their own backend here.
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(DashboardState {
        store: store.clone(),
        renderer: Arc::new(HtmlRenderer::new(config.dashboard.route.clone())),
        route: config.dashboard.route.clone(),
    });

    // Crash boundary, owned by this run loop
    let boundary = CrashBoundary::new(store);

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    if let Err(err) = http::start_http_server(&config.http, state, tx.subscribe()).await {
        boundary.exit_failure(err).await;
    }

    Ok(())
}
