use anyhow::{Context, Result};
use business_ideas::core::ConfigManager;
use business_ideas::start_web_server;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "business-ideas")]
#[command(about = "Serve the business idea generator form")]
struct Cli {
    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(long, env = "IDEAS_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "IDEAS_PORT")]
    port: Option<u16>,

    /// Base URL of the chat-completion API
    #[arg(long, env = "PERPLEXITY_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = ConfigManager::load(cli.config.as_deref())?;
    let config = config
        .with_overrides(cli.port, cli.api_url)
        .with_smtp_credentials(
            std::env::var("EMAIL_USER").ok(),
            std::env::var("EMAIL_PASS").ok(),
        );

    let json_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(json_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("business_ideas=info,rocket::server=off")),
        )
        .init();

    info!("Environment: {}", ConfigManager::get_environment());
    info!("Configuration: {}", source);
    info!("Server: http://0.0.0.0:{}", config.port);
    info!("Request timeout: {}s", config.timeout_seconds);
    match &config.smtp {
        Some(smtp) => info!("E-mail delivery via {}", smtp.host),
        None => info!("E-mail delivery disabled (no smtp section, EMAIL_USER/EMAIL_PASS unset)"),
    }

    start_web_server(config).await
}
