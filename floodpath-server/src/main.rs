//! Flood-aware evacuation routing server
//!
//! Loads a road network, classifies flood risk against the configured
//! radar scene and serves evacuation routes over HTTP.

mod config;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::BoxError;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use floodpath_core::prelude::*;

use crate::config::ServerConfig;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Road network GeoJSON, overrides the configured path
    #[arg(long)]
    network: Option<PathBuf>,

    /// Listen address, overrides the configured one
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run(Cli::parse()).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network.geojson_path = network;
    }
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    info!(
        path = %config.network.geojson_path.display(),
        "loading road network"
    );
    let mut graph = create_road_graph(&config.network)?;
    let summary = classify_flood_risk(&mut graph, &config.flood);
    info!(
        nodes = graph.node_count(),
        segments = summary.total_segments,
        flooded = summary.flooded_segments,
        "road network ready"
    );

    let state = Arc::new(AppState::new(
        graph,
        summary,
        config.network.clone(),
        config.flood,
    ));

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .concurrency_limit(config.max_concurrent_requests)
        .layer(CorsLayer::permissive());

    let app = handlers::router(state).layer(middleware);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Converts middleware failures (timeouts, load shedding) into responses
async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_owned())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("middleware failure: {err}"),
        )
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
