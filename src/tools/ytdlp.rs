//! yt-dlp backed video fetcher

use super::process::{CommandOutput, run_tool};
use super::traits::VideoFetcher;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Format selector for section downloads: best mp4 video + m4a audio, or best single mp4
const SECTION_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

/// Video fetcher that shells out to the `yt-dlp` binary
pub struct YtDlpFetcher {
    binary_path: PathBuf,
    timeout: Duration,
}

impl YtDlpFetcher {
    /// Create a fetcher for the given binary with a per-invocation timeout
    pub fn new(binary_path: PathBuf, timeout: Duration) -> Self {
        Self {
            binary_path,
            timeout,
        }
    }

    fn section_args(video_url: &str, start: f64, end: f64, output: &Path) -> Vec<OsString> {
        vec![
            "-f".into(),
            SECTION_FORMAT.into(),
            "--download-sections".into(),
            format!("*{}-{}", start, end).into(),
            "--merge-output-format".into(),
            "mp4".into(),
            "-o".into(),
            output.as_os_str().to_owned(),
            video_url.into(),
        ]
    }

    fn full_args(video_url: &str, max_height: u32, output: &Path) -> Vec<OsString> {
        vec![
            "-f".into(),
            full_format(max_height).into(),
            "--merge-output-format".into(),
            "mp4".into(),
            "-o".into(),
            output.as_os_str().to_owned(),
            video_url.into(),
        ]
    }
}

/// Format selector for full downloads, capped at `max_height`
fn full_format(max_height: u32) -> String {
    format!(
        "bestvideo[height<={h}][ext=mp4]+bestaudio[ext=m4a]/best[height<={h}][ext=mp4]/best",
        h = max_height
    )
}

#[async_trait]
impl VideoFetcher for YtDlpFetcher {
    async fn fetch_section(
        &self,
        video_url: &str,
        start: f64,
        end: f64,
        output: &Path,
    ) -> CommandOutput {
        let args = Self::section_args(video_url, start, end, output);
        run_tool(&self.binary_path, &args, self.timeout).await
    }

    async fn fetch_full(&self, video_url: &str, max_height: u32, output: &Path) -> CommandOutput {
        let args = Self::full_args(video_url, max_height, output);
        run_tool(&self.binary_path, &args, self.timeout).await
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
