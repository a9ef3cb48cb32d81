//! gaugewatch CLI
//!
//! Command-line interface for the gaugewatch threshold checker.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gaugewatch::api::HttpServer;
use gaugewatch::config::{LogFormat, LoggingConfig, DEFAULT_CONFIG_PATH};
use gaugewatch::models::MeasurementType;
use gaugewatch::thresholds::{LineReporter, ThresholdChecker, ThresholdIndex};
use gaugewatch::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// gaugewatch - threshold checks for posted measurements
#[derive(Parser)]
#[command(name = "gaugewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "GAUGEWATCH_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the threshold check endpoint
    Serve {
        /// Host to bind (overrides the config file)
        #[arg(long, env = "GAUGEWATCH_HOST")]
        host: Option<String>,

        /// HTTP port (overrides the config file)
        #[arg(long, env = "GAUGEWATCH_PORT")]
        port: Option<u16>,
    },

    /// Check one JSON reading against the configured thresholds
    Check {
        /// File holding the reading (stdin if not specified)
        file: Option<PathBuf>,
    },

    /// List the configured measurement types
    Thresholds {
        /// Show only this measurement type
        name: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return ExitCode::SUCCESS;
    }

    // Load configuration before anything can listen
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging, cli.verbose);

    let result = match cli.command {
        Commands::Serve { host, port } => run_serve(config, host, port).await,
        Commands::Check { file } => run_check(&config, file.as_deref()),
        Commands::Thresholds { name, format } => {
            run_thresholds(&config, name.as_deref(), format)
        }
        Commands::Completions { .. } => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries violation lines
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn build_checker(config: &Config) -> ThresholdChecker {
    let index = ThresholdIndex::from_config(config);
    ThresholdChecker::new(index, Arc::new(LineReporter::stdout()))
}

async fn run_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let checker = Arc::new(build_checker(&config));
    info!(
        measurement_types = checker.index().len(),
        contact = %config.email,
        "Loaded threshold configuration"
    );

    let addr = config.server.addr();
    HttpServer::new(checker)
        .serve(&addr, shutdown_signal())
        .await
        .with_context(|| format!("HTTP server on {addr} failed"))?;

    Ok(())
}

fn run_check(config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let body = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("failed to read reading from stdin")?;
            body
        }
    };

    let outcome = build_checker(config)
        .check(&body)
        .context("reading rejected")?;

    info!(
        request_id = %outcome.request_id,
        violations = outcome.violations.len(),
        "Reading checked"
    );
    Ok(())
}

fn run_thresholds(config: &Config, name: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let index = ThresholdIndex::from_config(config);

    let selected: Vec<&MeasurementType> = match name {
        Some(name) => vec![index
            .get(name)
            .with_context(|| format!("no measurement type named '{name}'"))?],
        None => index.iter().collect(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
        OutputFormat::Text => {
            println!("Contact: {}", config.email);
            println!("{:<24} {:>12} {:>12}", "NAME", "LOWER", "UPPER");
            for measurement in selected {
                println!(
                    "{:<24} {:>12} {:>12}",
                    measurement.name, measurement.lower_threshold, measurement.upper_threshold
                );
            }
        }
    }
    Ok(())
}

async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down...");
    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "gaugewatch", &mut io::stdout());
}
