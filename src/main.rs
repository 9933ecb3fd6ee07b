use anyhow::{Context, Result};
use textpilot::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` wins over `server.logs.level`; either must be a plain level.
fn resolve_log_level(env_level: Option<String>, configured: &str) -> Result<String> {
    let level = env_level.unwrap_or_else(|| configured.to_string());
    level.parse::<LevelFilter>().with_context(|| {
        format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })?;
    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Nothing is logged until the subscriber exists, so config errors go to stderr
    let (config, source) = match config::load().await {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match resolve_log_level(std::env::var("RUST_LOG").ok(), &config.server.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .json()
        .init();

    info!(
        "Starting TextPilot server with log level {} (configuration: {})",
        log_level, source
    );

    server::run(config).await?;

    Ok(())
}
