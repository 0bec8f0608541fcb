//! One-time discovery of the yt-dlp and ffmpeg binaries

use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Binary name of the downloader
pub const YTDLP: &str = "yt-dlp";
/// Binary name of the transcoder
pub const FFMPEG: &str = "ffmpeg";

/// Resolved locations of the external binaries
///
/// Built once at startup and shared with the pipeline, so a missing tool is
/// reported before the server accepts any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocator {
    ytdlp: PathBuf,
    ffmpeg: PathBuf,
}

impl ToolLocator {
    /// Create a locator from explicit binary paths
    pub fn new(ytdlp: PathBuf, ffmpeg: PathBuf) -> Self {
        Self { ytdlp, ffmpeg }
    }

    /// Resolve both binaries according to `config`
    ///
    /// An explicit path wins when it points at a file. Otherwise PATH is
    /// searched with the `which` crate, if `search_path` allows it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTool`] for the first binary that cannot be found.
    pub fn locate(config: &ToolsConfig) -> Result<Self> {
        let ytdlp = resolve(
            config.ytdlp_path.as_deref(),
            config.search_path,
            YTDLP,
            "brew install yt-dlp",
        )?;
        let ffmpeg = resolve(
            config.ffmpeg_path.as_deref(),
            config.search_path,
            FFMPEG,
            "brew install ffmpeg",
        )?;

        tracing::info!(?ytdlp, ?ffmpeg, "external tools located");
        Ok(Self { ytdlp, ffmpeg })
    }

    /// Path to yt-dlp
    pub fn ytdlp(&self) -> &Path {
        &self.ytdlp
    }

    /// Path to ffmpeg
    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }
}

fn resolve(
    explicit: Option<&Path>,
    search_path: bool,
    tool: &'static str,
    hint: &'static str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(?path, tool, "configured tool path does not exist");
    }

    if search_path && let Ok(path) = which::which(tool) {
        return Ok(path);
    }

    Err(Error::MissingTool { tool, hint })
}
