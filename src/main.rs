//! cassandra-stress-k8s - Main entry point
//!
//! Resolves parameters from flags and an optional parameter file, renders
//! the Job manifests, and prints or saves them.

use anyhow::Context;
use clap::CommandFactory;
use clap::error::ErrorKind;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cassandra_stress_k8s::cli::Cli;
use cassandra_stress_k8s::{RawParams, StressGenError, emit, generate, resolve};

/// Initialize logging to stderr so stdout stays clean YAML
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let mut params = cli.params();
    if let Some(path) = &cli.config {
        info!("Loading parameters from: {:?}", path);
        params = params.overlay(RawParams::load_from_file(path)?);
    }

    if let Some(path) = &cli.save_config {
        params.save_to_file(path)?;
    }

    let config = match resolve(params) {
        Ok(config) => config,
        Err(e) if e.is_usage_error() => usage_error(&e),
        Err(e) => return Err(e.into()),
    };

    let documents = generate(&config).context("Failed to render manifests")?;
    if let Some(path) = emit(&documents, &config)? {
        eprintln!("✓ Wrote {} manifests to {}", documents.len(), path.display());
    }

    Ok(())
}

/// Report a parameter problem the way clap reports flag errors, then exit
fn usage_error(err: &StressGenError) -> ! {
    let kind = match err {
        StressGenError::MissingRequiredField(_) => ErrorKind::MissingRequiredArgument,
        _ => ErrorKind::ValueValidation,
    };
    Cli::command().error(kind, err.to_string()).exit()
}
