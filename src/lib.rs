//! # yt2gif
//!
//! HTTP backend that turns a time range of a YouTube video into an animated GIF.
//!
//! ## Design Philosophy
//!
//! yt2gif is designed to be:
//! - **Stateless** - Each request runs its own pipeline over uniquely named files
//! - **Tool-driven** - Downloading and encoding are delegated to yt-dlp and ffmpeg
//! - **Self-cleaning** - Intermediate files never outlive the request that made them
//! - **Sensible defaults** - Works out of the box with zero configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use yt2gif::{Config, GifPipeline, RawConversionRequest, ToolLocator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     config.ensure_directories()?;
//!
//!     let locator = ToolLocator::locate(&config.tools)?;
//!     let pipeline = GifPipeline::from_locator(&locator, &config);
//!
//!     let request = RawConversionRequest::from_json(
//!         br#"{"url":"https://youtu.be/dQw4w9WgXcQ","startTime":2,"endTime":7}"#,
//!     )?
//!     .validate(pipeline.max_duration_secs())?;
//!
//!     let output = pipeline.convert(&request).await?;
//!     println!("{} ({})", output.output_ref, output.byte_size_formatted());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Download, trim, palette and encode pipeline
pub mod pipeline;
/// Request parsing and validation
pub mod request;
/// External tool invocation
pub mod tools;
/// Core result types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result, ToHttpStatus};
pub use pipeline::GifPipeline;
pub use request::{ConversionRequest, Quality, RawConversionRequest};
pub use tools::ToolLocator;
pub use types::{ConversionOutput, ConversionReply};

/// Resolves once the process receives a termination signal.
///
/// Pass it to [`api::start_api_server`] to stop accepting connections and
/// drain in-flight conversions on shutdown.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn shutdown_signal() {
    wait_for_signal().await;
    tracing::info!("Shutting down");
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal (Ctrl+C)");
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Err(_)) => {
            tracing::error!(error = %e, "Could not register any signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
