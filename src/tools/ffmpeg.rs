//! ffmpeg backed transcoder

use super::process::{CommandOutput, run_tool};
use super::traits::{BayerDither, ScaleFilter, Transcoder};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Transcoder that shells out to the `ffmpeg` binary
///
/// Every invocation passes `-y`; stale files at the output path are
/// overwritten rather than failing the stage.
pub struct FfmpegTranscoder {
    binary_path: PathBuf,
    timeout: Duration,
}

impl FfmpegTranscoder {
    /// Create a transcoder for the given binary with a per-invocation timeout
    pub fn new(binary_path: PathBuf, timeout: Duration) -> Self {
        Self {
            binary_path,
            timeout,
        }
    }

    fn trim_args(input: &Path, start: f64, duration: f64, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-ss".into(),
            start.to_string().into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-t".into(),
            duration.to_string().into(),
            "-c".into(),
            "copy".into(),
            output.as_os_str().to_owned(),
        ]
    }

    fn palette_args(input: &Path, scale: ScaleFilter, colors: u32, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-vf".into(),
            format!("{},palettegen=max_colors={}", scale.chain(), colors).into(),
            output.as_os_str().to_owned(),
        ]
    }

    fn encode_args(
        input: &Path,
        palette: &Path,
        scale: ScaleFilter,
        dither: BayerDither,
        output: &Path,
    ) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-i".into(),
            palette.as_os_str().to_owned(),
            "-lavfi".into(),
            format!("{}[x];[x][1:v]paletteuse={}", scale.chain(), dither).into(),
            output.as_os_str().to_owned(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn trim_copy(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> CommandOutput {
        let args = Self::trim_args(input, start, duration, output);
        run_tool(&self.binary_path, &args, self.timeout).await
    }

    async fn generate_palette(
        &self,
        input: &Path,
        scale: ScaleFilter,
        colors: u32,
        output: &Path,
    ) -> CommandOutput {
        let args = Self::palette_args(input, scale, colors, output);
        run_tool(&self.binary_path, &args, self.timeout).await
    }

    async fn encode_with_palette(
        &self,
        input: &Path,
        palette: &Path,
        scale: ScaleFilter,
        dither: BayerDither,
        output: &Path,
    ) -> CommandOutput {
        let args = Self::encode_args(input, palette, scale, dither, output);
        run_tool(&self.binary_path, &args, self.timeout).await
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
