//! Conversion pipeline for YouTube clips
//!
//! Stages run strictly in order:
//! 1. Section download - fetch only the requested time range
//! 2. Full download fallback - fetch the whole video if (1) fails
//! 3. Trim - cut the requested range out of the full download
//! 4. Palette - sample the clip into a bounded color table
//! 5. Encode - render the animated image using the palette
//! 6. Cleanup - transient files are dropped on every exit path
//!
//! A stage succeeds when the file it is meant to produce exists afterwards.
//! Any fatal failure returns early; the [`PipelineArtifacts`] guards then
//! remove every transient file and the partial output.

use crate::config::{Config, ConversionConfig, StorageConfig};
use crate::error::{Error, Result};
use crate::request::ConversionRequest;
use crate::tools::{
    BayerDither, FfmpegTranscoder, ScaleFilter, ToolLocator, Transcoder, VideoFetcher,
    YtDlpFetcher,
};
use crate::types::ConversionOutput;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod artifacts;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use artifacts::{OutputFile, PipelineArtifacts, TransientFile};

/// Conversion pipeline executor
pub struct GifPipeline {
    /// Source video downloader
    fetcher: Arc<dyn VideoFetcher>,
    /// Trim, palette and encode backend
    transcoder: Arc<dyn Transcoder>,
    /// Output and working directories
    storage: StorageConfig,
    /// Encoder constants and limits
    conversion: ConversionConfig,
}

impl GifPipeline {
    /// Create a pipeline over arbitrary tool implementations
    pub fn new(
        fetcher: Arc<dyn VideoFetcher>,
        transcoder: Arc<dyn Transcoder>,
        storage: StorageConfig,
        conversion: ConversionConfig,
    ) -> Self {
        Self {
            fetcher,
            transcoder,
            storage,
            conversion,
        }
    }

    /// Create a pipeline backed by the located yt-dlp and ffmpeg binaries
    pub fn from_locator(locator: &ToolLocator, config: &Config) -> Self {
        let timeout = config.tools.command_timeout;
        Self::new(
            Arc::new(YtDlpFetcher::new(locator.ytdlp().to_path_buf(), timeout)),
            Arc::new(FfmpegTranscoder::new(locator.ffmpeg().to_path_buf(), timeout)),
            config.storage.clone(),
            config.conversion.clone(),
        )
    }

    /// Longest clip this pipeline accepts, in seconds
    pub fn max_duration_secs(&self) -> f64 {
        self.conversion.max_duration_secs
    }

    /// Run a validated request through every stage
    ///
    /// # Returns
    ///
    /// The public reference and size of the produced clip. On error no file
    /// created by this run remains on disk.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<ConversionOutput> {
        let artifacts = PipelineArtifacts::new(&self.storage.temp_dir, &self.storage.output_dir);

        info!(
            run_id = %artifacts.run_id,
            video_id = %request.video_id,
            start = request.start_time,
            end = request.end_time,
            fps = request.fps,
            width = request.scale_width(),
            quality = request.quality.as_str(),
            "starting conversion"
        );

        self.download(request, &artifacts).await?;

        let scale = ScaleFilter {
            fps: request.fps,
            width: request.scale_width(),
        };
        self.generate_palette(request, scale, &artifacts).await?;
        self.encode(scale, &artifacts).await?;

        let byte_size = tokio::fs::metadata(artifacts.output.path()).await?.len();
        let run_id = artifacts.run_id.clone();
        let output_path = artifacts.into_output();
        let output_ref = self.public_ref(&output_path);

        info!(%run_id, %output_ref, byte_size, "conversion complete");
        Ok(ConversionOutput {
            output_ref,
            byte_size,
        })
    }

    /// Stages 1-3: obtain the trimmed clip at the raw video path
    async fn download(
        &self,
        request: &ConversionRequest,
        artifacts: &PipelineArtifacts,
    ) -> Result<()> {
        let source = request.source_url();
        let raw = artifacts.raw_video.path();

        let section = self
            .fetcher
            .fetch_section(&source, request.start_time, request.end_time, raw)
            .await;
        if section.success && file_exists(raw).await {
            debug!(run_id = %artifacts.run_id, "section download complete");
            return Ok(());
        }

        warn!(
            run_id = %artifacts.run_id,
            fetcher = self.fetcher.name(),
            code = ?section.exit_code,
            "section download failed, falling back to full download"
        );
        // A failed section download may leave a partial file that would
        // satisfy the trim check below.
        artifacts.raw_video.remove();

        let full_path = artifacts.full_video.path();
        let full = self
            .fetcher
            .fetch_full(&source, self.conversion.fallback_max_height, full_path)
            .await;
        if !full.success || !file_exists(full_path).await {
            return Err(Error::DownloadFailed {
                output: full.output,
            });
        }

        let trim = self
            .transcoder
            .trim_copy(full_path, request.start_time, request.duration(), raw)
            .await;
        artifacts.full_video.remove();

        if !file_exists(raw).await {
            return Err(Error::TrimFailed {
                output: trim.output,
            });
        }

        debug!(run_id = %artifacts.run_id, "full download trimmed");
        Ok(())
    }

    /// Stage 4: palette image at the palette path
    async fn generate_palette(
        &self,
        request: &ConversionRequest,
        scale: ScaleFilter,
        artifacts: &PipelineArtifacts,
    ) -> Result<()> {
        let result = self
            .transcoder
            .generate_palette(
                artifacts.raw_video.path(),
                scale,
                request.palette_colors(),
                artifacts.palette.path(),
            )
            .await;

        if !file_exists(artifacts.palette.path()).await {
            return Err(Error::PaletteFailed {
                output: result.output,
            });
        }
        Ok(())
    }

    /// Stage 5: animated image at the output path
    async fn encode(&self, scale: ScaleFilter, artifacts: &PipelineArtifacts) -> Result<()> {
        let dither = BayerDither {
            scale: self.conversion.bayer_scale,
        };
        let result = self
            .transcoder
            .encode_with_palette(
                artifacts.raw_video.path(),
                artifacts.palette.path(),
                scale,
                dither,
                artifacts.output.path(),
            )
            .await;

        if !file_exists(artifacts.output.path()).await {
            return Err(Error::EncodeFailed {
                output: result.output,
            });
        }
        Ok(())
    }

    fn public_ref(&self, output_path: &Path) -> String {
        let file_name = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = self.storage.public_prefix.trim_matches('/');
        if prefix.is_empty() {
            file_name
        } else {
            format!("{prefix}/{file_name}")
        }
    }
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
