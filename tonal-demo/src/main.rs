//! Tonal demo server
//!
//! Serves one of the two sentiment demos as a single web page, plus a JSON
//! endpoint for scripted use.
//!
//! # Usage
//!
//! ```bash
//! # Classifier demo with the default artifact in the working directory
//! tonal-demo
//!
//! # Lexicon demo on another port
//! tonal-demo --variant lexicon --bind 0.0.0.0:8080
//!
//! # Settings from a file, one override from the environment
//! TONAL_VARIANT=lexicon tonal-demo --config tonal.toml
//!
//! # Per-analysis logging
//! RUST_LOG=tonal_core=debug tonal-demo
//! ```
//!
//! All loading happens before the listener is bound; a missing artifact or
//! broken resource file stops startup.

mod config;
mod presenter;
mod routes;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use tonal_core::{Backend, LinguisticResources, SentimentPipeline};
use tonal_types::Variant;

use config::{Cli, DemoConfig};
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_writer(io::stderr).with_env_filter(filter).init();

    if let Err(err) = run(cli).await {
        error!("{err:#}");
        return Err(err);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = DemoConfig::resolve(&cli)?;
    info!(variant = %config.variant, bind = %config.bind, "starting tonal demo");

    let pipeline = build_pipeline(&config)?;
    pipeline
        .warm()
        .with_context(|| format!("cannot start the {} demo", config.variant))?;

    let app = routes::router(AppState::new(Arc::new(pipeline)));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("cannot bind {}", config.bind))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

fn build_pipeline(config: &DemoConfig) -> Result<SentimentPipeline> {
    let pipeline = match config.variant {
        Variant::Classifier => {
            SentimentPipeline::classifier(Backend::classifier_artifact(&config.artifact))
        }
        Variant::Lexicon => {
            let resources = LinguisticResources::load(config.resources.as_deref())
                .context("cannot load linguistic resources")?;
            SentimentPipeline::builtin_lexicon(&resources)
        }
    };
    Ok(pipeline.with_thresholds(config.thresholds))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
