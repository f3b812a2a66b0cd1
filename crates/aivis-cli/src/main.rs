//! Operator CLI for running AI-visibility fingerprints.

use std::path::{Path, PathBuf};

use aivis_core::{BusinessProfile, FingerprintConfig, RunOptions};
use aivis_engine::{build_prompts, fingerprint};
use aivis_gateway::ProviderRegistry;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aivis-cli")]
#[command(about = "AI-visibility fingerprinting for local businesses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full fingerprint for a business profile and print the
    /// analysis as JSON.
    Fingerprint {
        /// Path to the business profile (.yaml/.yml or .json).
        #[arg(long)]
        profile: PathBuf,
        /// Override the configured execution mode.
        #[arg(long)]
        parallel: Option<bool>,
        /// Override the configured wave size for parallel execution.
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Print the prompt battery that would be sent for a profile, without
    /// querying any provider.
    Prompts {
        /// Path to the business profile (.yaml/.yml or .json).
        #[arg(long)]
        profile: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fingerprint {
            profile,
            parallel,
            batch_size,
        } => run_fingerprint(&profile, parallel, batch_size).await,
        Commands::Prompts { profile } => print_prompts(&profile),
    }
}

async fn run_fingerprint(
    profile_path: &Path,
    parallel: Option<bool>,
    batch_size: Option<usize>,
) -> anyhow::Result<()> {
    let profile = load_profile(profile_path)?;
    let config = FingerprintConfig::from_env()?;

    let registry = ProviderRegistry::from_env()?;
    let providers = registry.provider_names();
    if providers.is_empty() {
        anyhow::bail!(
            "no providers configured; set AIVIS_<PROVIDER>_BASE_URL / _API_KEY / _MODELS"
        );
    }
    tracing::info!(?providers, "configured providers");

    let options = RunOptions {
        parallel,
        batch_size,
    };
    let analysis = fingerprint(&registry, &profile, &config, options).await?;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn print_prompts(profile_path: &Path) -> anyhow::Result<()> {
    let profile = load_profile(profile_path)?;
    let prompts = build_prompts(&profile)?;
    println!("factual:\n  {}\n", prompts.factual);
    println!("opinion:\n  {}\n", prompts.opinion);
    println!("recommendation:\n  {}", prompts.recommendation);
    Ok(())
}

fn load_profile(path: &Path) -> anyhow::Result<BusinessProfile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read profile {}: {e}", path.display()))?;
    let profile = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw)?,
        _ => serde_yaml::from_str(&raw)?,
    };
    Ok(profile)
}
