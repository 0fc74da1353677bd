mod api;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::OpenWeatherMapClient;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "agroadvisor=debug,tower_http=debug,warn",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => serve(cli.config, bind).await,
        Commands::Init => init(cli.config.as_ref()),
        Commands::Check => check(cli.config).await,
        Commands::Yield { input } => {
            let request: api::requests::YieldRequest = read_request(&input)?;
            let estimate = logic::estimate_yield(&request.into_input()?)?;
            print_json(&estimate)
        }
        Commands::Fertilizer { input } => {
            let request: api::requests::FertilizerRequest = read_request(&input)?;
            let plan = logic::estimate_fertilizer(&request.into_input()?)?;
            print_json(&plan)
        }
    }
}

async fn serve(config_path: Option<PathBuf>, bind: Option<String>) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());

    let state = api::AppState::new(config).context("Failed to initialize application state")?;
    if state.weather.is_none() {
        tracing::warn!("OpenWeatherMap not configured, weather endpoints will serve sample data");
    }
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init(config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    if Config::exists(config_path) {
        println!("A configuration file already exists; edit it directly or remove it first.");
        return Ok(());
    }
    Config::setup_interactive()?;
    Ok(())
}

async fn check(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    println!("Configuration OK");
    println!("  Bind address: {}", config.server.bind);
    println!("  Shops listed: {}", config.shops.len());

    match config.weather() {
        Some(owm) => {
            let client = OpenWeatherMapClient::new(owm.clone())?;
            match client.test_connection().await {
                Ok(true) => println!("  OpenWeatherMap: OK"),
                Ok(false) => println!("  OpenWeatherMap: rejected (check the API key)"),
                Err(e) => println!("  OpenWeatherMap: OFFLINE ({})", e),
            }
        }
        None => println!("  OpenWeatherMap: not configured (sample data will be served)"),
    }
    Ok(())
}

fn read_request<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid request in {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
