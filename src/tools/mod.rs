//! External tool integration
//!
//! The pipeline talks to yt-dlp and ffmpeg only through the [`VideoFetcher`]
//! and [`Transcoder`] traits. The CLI implementations build argv arrays and
//! run them through [`run_tool`], which bounds each call with a timeout.

mod ffmpeg;
mod locator;
mod process;
mod traits;
mod ytdlp;

pub use ffmpeg::FfmpegTranscoder;
pub use locator::{FFMPEG, ToolLocator, YTDLP};
pub use process::{CommandOutput, run_tool};
pub use traits::{BayerDither, ScaleFilter, Transcoder, VideoFetcher};
pub use ytdlp::YtDlpFetcher;
