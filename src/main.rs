//! S3 state backend
//!
//! Prints the attribute schema, validates a backend configuration, or resolves
//! it against AWS.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use s3_state_backend::{
    config::{CliSettings, LogFormat},
    BackendError, Diagnostics, RawConfig, S3Backend,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// S3 state backend
///
/// Validates and resolves S3 remote-state backend configurations.
#[derive(Parser, Debug)]
#[command(name = "s3-state-backend")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: json, pretty (overrides LOG_FORMAT env var)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the accepted attributes as JSON
    Schema,

    /// Validate a configuration file without contacting AWS
    Validate {
        /// JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Validate a configuration file, then resolve credentials and clients
    Configure {
        /// JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut settings = CliSettings::load()?;
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_format) = args.log_format {
        settings.log_format = log_format;
    }

    init_tracing(&settings.log_level, settings.log_format);

    let mut backend = S3Backend::new();

    match args.command {
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&backend.schema())
                .context("Failed to serialize schema")?;
            println!("{}", schema);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { config } => {
            let raw = RawConfig::from_file(&config)?;
            let (_, diags) = backend.validate(raw);
            print_diagnostics(&diags)?;
            Ok(exit_code(diags))
        }
        Command::Configure { config } => {
            let raw = RawConfig::from_file(&config)?;
            let (raw, diags) = backend.validate(raw);
            if diags.has_errors() {
                print_diagnostics(&diags)?;
                return Ok(exit_code(diags));
            }

            let mut all = diags;
            all.extend(backend.configure(&raw).await);
            print_diagnostics(&all)?;

            if let Some(state) = backend.state() {
                tracing::info!(
                    bucket = %state.bucket(),
                    default_state_key = %state.state_key(s3_state_backend::state::DEFAULT_WORKSPACE),
                    locking = state.locking_enabled(),
                    "Backend ready"
                );
            }
            Ok(exit_code(all))
        }
    }
}

fn print_diagnostics(diags: &Diagnostics) -> Result<()> {
    if diags.is_empty() {
        return Ok(());
    }
    let json = serde_json::to_string_pretty(diags).context("Failed to serialize diagnostics")?;
    println!("{}", json);
    Ok(())
}

/// Failure when any diagnostic is an error; warnings alone still succeed
fn exit_code(diags: Diagnostics) -> ExitCode {
    match BackendError::from_diagnostics(diags) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Backend configuration failed");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing subscriber with the specified log level
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(log_level: &str, log_format: LogFormat) {
    // Build filter from RUST_LOG env var or use provided log level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).init();
}
