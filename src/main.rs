// exam-export-service/src/main.rs

mod config;
mod content;
mod error;
mod layouts;
mod models;
mod persistence;
mod pipeline;
mod renderers;
mod routes;
mod state;

use crate::config::Config;
use crate::content::{ContentTransformer, MediaPaths};
use crate::layouts::DocumentAssembler;
use crate::persistence::{MemoryStore, PostStore, Seed};
use crate::pipeline::ExportPipeline;
use crate::renderers::{LatexRenderer, WeasyPrintRenderer};
use crate::state::AppState;
use anyhow::Context;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Print to stderr BEFORE logging initialization to catch early failures
    eprintln!("Starting exam-export-service...");

    let config = match Config::load() {
        Ok(cfg) => {
            eprintln!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Exam Export Service"
    );

    let store: Arc<dyn PostStore> = match &config.store.seed_path {
        Some(path) => Arc::new(
            MemoryStore::from_seed_file(path)
                .await
                .with_context(|| format!("Failed to load post seed from {}", path))?,
        ),
        None => {
            info!("No seed configured, starting with an empty post store");
            Arc::new(MemoryStore::new(Seed::default()))
        }
    };

    let transformer = ContentTransformer::new(
        MediaPaths::from_config(&config.media),
        Arc::new(LatexRenderer::new(
            &config.math.latex_bin,
            &config.math.dvipng_bin,
        )),
    );
    let assembler = DocumentAssembler::new(transformer, config.exam.clone())
        .context("Failed to register layout templates")?;
    let pipeline = ExportPipeline::new(
        store.clone(),
        Arc::new(assembler),
        Arc::new(WeasyPrintRenderer::new(&config.pdf.weasyprint_bin)),
    );

    let app = routes::router(AppState { store, pipeline });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    info!(
        bind_addr = %config.server.bind_addr,
        media_root = %config.media.root,
        "Listening for export requests"
    );

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();

    // Spawn signal handler
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal, stopping server");
                cancel_for_signal.cancel();
            }
            Err(err) => {
                error!("Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("Server error")?;

    info!("Server stopped");

    Ok(())
}
