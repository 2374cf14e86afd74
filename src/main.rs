use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use stylebot::config::Config;
use stylebot::gemini::{GeminiClient, FALLBACK_MODEL};
use stylebot::server::Server;
use stylebot::TextGenerator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stylebot", version, about = "AI fashion stylist web backend")]
struct Cli {
    /// Override BIND_ADDR
    #[arg(long, global = true)]
    bind: Option<SocketAddr>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Send a short prompt to the generation service and report the result
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let mut config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("stylebot={},tower_http=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Check => check(config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    stylebot::health::mark_started();

    tracing::info!("Starting stylebot service");
    tracing::info!(
        "Configuration: bind_addr={}, model={}, rate_limit={}/{}s, max_retries={}, retry_delay={}s",
        config.bind_addr,
        config.gemini_model,
        config.rate_limit_max_calls,
        config.rate_limit_period_secs,
        config.max_retries,
        config.retry_delay_secs
    );

    let server = Server::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?;

    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn check(config: Config) -> Result<()> {
    const PROMPT: &str = "Say hello in one word";

    let client = GeminiClient::from_config(&config)?;
    println!("Testing Gemini API connection ({})...", client.model());

    match client.generate(PROMPT).await {
        Ok(text) => {
            println!("Success! Response: {}", text.trim());
            return Ok(());
        }
        Err(e) => println!("Error: {}", e),
    }

    println!("Trying alternative model {}...", FALLBACK_MODEL);
    let fallback = client.with_model(FALLBACK_MODEL);
    match fallback.generate(PROMPT).await {
        Ok(text) => {
            println!("Success with alternative! Response: {}", text.trim());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Alternative also failed: {}", e)),
    }
}
