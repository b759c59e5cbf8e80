//! datagen - CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use datagen_sdk::{
    cli::{parse_parameters, Args, Commands, Settings, Verbosity},
    ClientConfig, DatagenClient, DatagenError,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbosity());

    if let Err(err) = run(args).await {
        match err.downcast_ref::<DatagenError>() {
            Some(e) => eprintln!("{} {}: {}", "✗".red().bold(), e.kind(), e),
            None => eprintln!("{} {:#}", "✗".red().bold(), err),
        }
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG overrides the verbosity flags
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let config = ClientConfig::from_options(settings.client_options(&args)?)?;
    let verbosity = args.verbosity();

    match &args.command {
        Commands::Exec { tool, params, param } => {
            let parameters = parse_parameters(params.as_deref(), param).map_err(anyhow::Error::msg)?;
            let client = DatagenClient::new(config)?;

            if verbosity.show_status() {
                eprintln!("{} {} → {}", "▶".cyan(), tool.bold(), client.execute_url());
            }

            let result = client.execute_tool(tool, Some(parameters)).await?;
            let rendered =
                serde_json::to_string_pretty(&result).context("Failed to render tool result")?;
            println!("{}", rendered);
        }

        Commands::Config => show_config(&config, &args),
    }

    Ok(())
}

fn show_config(config: &ClientConfig, args: &Args) {
    let settings_path = args
        .config
        .clone()
        .or_else(Settings::default_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("{}", "datagen configuration".bold());
    println!("  {:<14} {}", "settings file", settings_path);
    println!("  {:<14} {}", "base_url", config.base_url());
    println!("  {:<14} {}", "api_key", mask_key(config.api_key()).as_str().dimmed());
    println!("  {:<14} {}s", "timeout", config.timeout().as_secs_f64());
    println!("  {:<14} {}", "retries", config.retries());
    println!("  {:<14} {}s", "backoff", config.backoff().as_secs_f64());
}

/// Show only the last four characters of a credential
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
