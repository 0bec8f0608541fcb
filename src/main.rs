//! yt2gif server binary
//!
//! Loads configuration, checks that yt-dlp and ffmpeg are reachable, then
//! serves the conversion API until SIGINT/SIGTERM.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use yt2gif::{Config, GifPipeline, ToolLocator};

#[derive(Parser)]
#[command(name = "yt2gif")]
#[command(version, about = "Convert YouTube time ranges into animated GIFs over HTTP", long_about = None)]
struct Cli {
    /// JSON configuration file; defaults apply to anything it omits
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the API bind address (e.g. 0.0.0.0:8080)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "yt2gif exited with an error");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> yt2gif::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(bind) = cli.bind {
        config.api.bind_address = bind;
    }

    // Refuse to start without the external tools rather than failing every request
    let locator = ToolLocator::locate(&config.tools)?;
    config.ensure_directories()?;
    info!(
        output_dir = %config.storage.output_dir.display(),
        temp_dir = %config.storage.temp_dir.display(),
        "storage ready"
    );

    let pipeline = Arc::new(GifPipeline::from_locator(&locator, &config));
    yt2gif::api::start_api_server(pipeline, Arc::new(config), yt2gif::shutdown_signal()).await
}
