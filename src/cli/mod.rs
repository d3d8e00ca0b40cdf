use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use crate::clients::nature_vision::NatureVisionRemote;
use crate::core::content::ToolOutcome;
use crate::infra::config::Config;
use crate::tools::species::{IdentifySpeciesArgs, SpeciesSvc};

#[derive(Parser)]
#[command(name = "nature-vision-mcp")]
#[command(about = "Nature Vision species identification over MCP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP (stdio by default, streamable HTTP with MODE=server)
    Serve,
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Health check a server-mode instance
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Identify a species once and print the result
    Identify {
        #[arg(long)]
        image_url: Option<String>,
        /// Base64-encoded image
        #[arg(long)]
        image_data: Option<String>,
        /// plant|bug|bird|reptile|mollusc|mammal|fungi|amphibian
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        top_k: Option<f64>,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "nature vision failed");
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match Config::from_env() {
            Ok(cfg) => {
                eprintln!("Configuration is valid (mode={}, endpoint={})", cfg.mode, cfg.endpoint);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                eprintln!("Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Identify {
            image_url,
            image_data,
            category,
            top_k,
        } => {
            let args = IdentifySpeciesArgs {
                image_url,
                image_data,
                category,
                top_k,
            };
            match identify_once(args).await {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Identification failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

async fn identify_once(args: IdentifySpeciesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let args = args.validated().map_err(|e| e.message.to_string())?;
    let cfg = Config::from_env()?;
    let svc = SpeciesSvc::new(Arc::new(NatureVisionRemote::from_config(&cfg)?));
    match svc.identify(args).await {
        ToolOutcome::Text(text) => Ok(text),
        ToolOutcome::Failed => Err("request failed; see logs for details".into()),
    }
}
