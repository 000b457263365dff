//! universal-ai - multi-provider AI request router
//!
//! Command line front end over the [`Orchestrator`].

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use universal_ai::utils::logging::{LogFormat, init_tracing};
use universal_ai::{Capability, Config, GenerationRequest, Orchestrator, Result, Tier};

const DEFAULT_CONFIG_PATH: &str = "config/router.yaml";

#[derive(Debug, Parser)]
#[command(name = "universal-ai", version, about = "Route AI generation requests across providers")]
struct Cli {
    /// Configuration file; falls back to config/router.yaml, then UAI_* variables
    #[arg(long, global = true, env = "UAI_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one request and print the response envelope as JSON
    Generate {
        /// Capability: text, image, voice, video or audio
        #[arg(long = "type", default_value = "text")]
        capability: Capability,
        /// Prompt text; for audio, the URL of the file to transcribe
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long, default_value = "free")]
        tier: Tier,
    },
    /// Probe every provider once and print the results
    Health,
    /// List the registered providers
    Providers,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_format, "info") {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Command::Generate {
            capability,
            prompt,
            model,
            tier,
        } => {
            let orchestrator = Orchestrator::from_config(&config)?;
            orchestrator.start().await;

            let mut request = GenerationRequest::for_capability(capability, prompt).with_tier(tier);
            if let Some(model) = model {
                request = request.with_model(model);
            }

            let response = orchestrator.process(request).await;
            orchestrator.shutdown();
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Health => {
            let orchestrator = Orchestrator::from_config(&config)?;
            orchestrator.health_monitor().check_all().await;
            let system = orchestrator.system_health();

            println!(
                "{} ({}/{} healthy)",
                system.status, system.healthy_providers, system.total_providers
            );
            for (name, health) in &system.providers {
                println!(
                    "  {:<16} {:<9} {:>6}  {}",
                    name,
                    if health.healthy { "healthy" } else { "down" },
                    health
                        .last_latency_ms
                        .map(|ms| format!("{}ms", ms))
                        .unwrap_or_else(|| "-".to_string()),
                    health.last_error.as_deref().unwrap_or("")
                );
            }
        }
        Command::Providers => {
            let orchestrator = Orchestrator::from_config(&config)?;
            for provider in orchestrator.registry().iter() {
                let capabilities: Vec<String> =
                    provider.capabilities().map(|c| c.to_string()).collect();
                println!(
                    "  {:<16} {:<11} {:<40} [{}]{}",
                    provider.name,
                    provider.kind.as_str(),
                    provider.base_url,
                    capabilities.join(", "),
                    if provider.has_credential() {
                        ""
                    } else {
                        "  (no credential)"
                    }
                );
            }
        }
    }

    Ok(())
}

async fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        info!("Loading configuration from {}", path.display());
        return Config::from_file(path).await;
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if tokio::fs::try_exists(default_path).await.unwrap_or(false) {
        info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
        return Config::from_file(default_path).await;
    }

    debug!("No configuration file found, reading UAI_* environment variables");
    Config::from_env()
}
