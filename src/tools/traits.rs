//! Traits and types for the external downloader and transcoder

use super::process::CommandOutput;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Frame-rate and resize stage shared by palette generation and encoding
///
/// Height is derived from the source aspect ratio; resampling uses lanczos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFilter {
    /// Output frame rate
    pub fps: u32,
    /// Output width in pixels
    pub width: u32,
}

impl ScaleFilter {
    /// Render as an ffmpeg filter chain fragment
    #[must_use]
    pub fn chain(&self) -> String {
        format!("fps={},scale={}:-1:flags=lanczos", self.fps, self.width)
    }
}

/// Ordered (Bayer) dithering applied when mapping frames onto the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BayerDither {
    /// Pattern scale, 0-5; higher values give a less visible crosshatch
    pub scale: u8,
}

impl fmt::Display for BayerDither {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dither=bayer:bayer_scale={}", self.scale)
    }
}

/// Fetches source video from YouTube
///
/// Implementations report the raw invocation outcome; deciding whether a
/// result is usable (exit status plus file existence) is the pipeline's job.
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Download only the `[start, end]` section of the video to `output`
    async fn fetch_section(
        &self,
        video_url: &str,
        start: f64,
        end: f64,
        output: &Path,
    ) -> CommandOutput;

    /// Download the whole video, capped at `max_height`, to `output`
    async fn fetch_full(&self, video_url: &str, max_height: u32, output: &Path) -> CommandOutput;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Trims video and renders palette-based animated images
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Stream-copy `duration` seconds of `input` starting at `start` into `output`
    async fn trim_copy(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> CommandOutput;

    /// Sample `input` through `scale` and write a palette of at most `colors` entries
    async fn generate_palette(
        &self,
        input: &Path,
        scale: ScaleFilter,
        colors: u32,
        output: &Path,
    ) -> CommandOutput;

    /// Render `input` through `scale` using `palette`, dithered, into `output`
    async fn encode_with_palette(
        &self,
        input: &Path,
        palette: &Path,
        scale: ScaleFilter,
        dither: BayerDither,
        output: &Path,
    ) -> CommandOutput;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
