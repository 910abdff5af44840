use anyhow::Context;
use clap::Parser;
use release_proxy::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "release_proxy=info,tower_http=info";

#[derive(Parser)]
#[command(name = "release-proxy")]
#[command(about = "Authenticated proxy for private GitHub Releases update manifests")]
#[command(version)]
struct Cli {
    /// YAML config file (environment variables override it)
    #[arg(short, long, env = "RELEASE_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(host) = cli.host {
        config.host = host;
    }

    release_proxy::server::serve(config)
        .await
        .context("Server failed")?;

    Ok(())
}
