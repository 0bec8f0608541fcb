//! Common test utilities for yt2gif integration tests
//!
//! Stand-in `yt-dlp` and `ffmpeg` shell scripts that honor the output path
//! conventions of the real tools, so the whole stack can run without network
//! access or codecs.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use yt2gif::Config;

/// Bytes every fake tool writes to its output file
pub const FAKE_CONTENT: &str = "GIF89a-fake";

/// Script creation and execution must not overlap, or a concurrent fork can
/// keep a write handle open and make exec fail with ETXTBSY.
pub static SERIAL: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// How the fake yt-dlp responds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpMode {
    /// Section and full downloads both succeed
    Ok,
    /// `--download-sections` fails, full downloads succeed
    SectionUnsupported,
    /// Every download fails
    Offline,
    /// Every download hangs
    Hang,
}

/// How the fake ffmpeg responds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfmpegMode {
    /// Every invocation writes its output
    Ok,
    /// Writing a .gif fails
    EncodeFails,
}

/// A temp root with fake binaries, storage dirs and a call log
pub struct FakeTools {
    pub root: TempDir,
    pub ytdlp: PathBuf,
    pub ffmpeg: PathBuf,
    pub log: PathBuf,
}

impl FakeTools {
    pub fn new(ytdlp_mode: YtDlpMode, ffmpeg_mode: FfmpegMode) -> Self {
        let root = tempfile::tempdir().unwrap();
        let log = root.path().join("calls.log");
        let bin = root.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();

        let ytdlp = bin.join("yt-dlp");
        write_script(&ytdlp, &ytdlp_script(ytdlp_mode, &log));
        let ffmpeg = bin.join("ffmpeg");
        write_script(&ffmpeg, &ffmpeg_script(ffmpeg_mode, &log));

        Self {
            root,
            ytdlp,
            ffmpeg,
            log,
        }
    }

    /// Config pointing at the fake binaries, with PATH lookup disabled
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.tools.ytdlp_path = Some(self.ytdlp.clone());
        config.tools.ffmpeg_path = Some(self.ffmpeg.clone());
        config.tools.search_path = false;
        config.tools.command_timeout = Duration::from_secs(10);
        config.storage.output_dir = self.root.path().join("gifs");
        config.storage.temp_dir = self.root.path().join("temp");
        config
    }

    /// One line per tool invocation, e.g. `yt-dlp section` or `ffmpeg gif`
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn entries(&self, dir: &str) -> usize {
        std::fs::read_dir(self.root.path().join(dir))
            .map(|d| d.count())
            .unwrap_or(0)
    }
}

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn ytdlp_script(mode: YtDlpMode, log: &Path) -> String {
    let on_section = match mode {
        YtDlpMode::Ok => format!("printf '{FAKE_CONTENT}' > \"$out\""),
        YtDlpMode::SectionUnsupported => {
            "echo 'ERROR: requested sections unavailable' >&2; exit 1".to_string()
        }
        YtDlpMode::Offline => "echo 'ERROR: network unreachable' >&2; exit 1".to_string(),
        YtDlpMode::Hang => "sleep 30".to_string(),
    };
    let on_full = match mode {
        YtDlpMode::Ok | YtDlpMode::SectionUnsupported => {
            format!("printf '{FAKE_CONTENT}' > \"$out\"")
        }
        YtDlpMode::Offline => "echo 'ERROR: network unreachable' >&2; exit 1".to_string(),
        YtDlpMode::Hang => "sleep 30".to_string(),
    };

    format!(
        r#"#!/bin/sh
out=""
kind=full
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    --download-sections) kind=section ;;
  esac
  shift
done
echo "yt-dlp $kind" >> "{log}"
if [ "$kind" = section ]; then
  {on_section}
else
  {on_full}
fi
"#,
        log = log.display(),
    )
}

fn ffmpeg_script(mode: FfmpegMode, log: &Path) -> String {
    let on_gif = match mode {
        FfmpegMode::Ok => format!("printf '{FAKE_CONTENT}' > \"$out\""),
        FfmpegMode::EncodeFails => "echo 'Error initializing filter paletteuse' >&2; exit 1".to_string(),
    };

    format!(
        r#"#!/bin/sh
for arg in "$@"; do out="$arg"; done
case "$out" in
  *.gif) kind=gif ;;
  *.png) kind=palette ;;
  *) kind=trim ;;
esac
echo "ffmpeg $kind" >> "{log}"
if [ "$kind" = gif ]; then
  {on_gif}
else
  printf '{FAKE_CONTENT}' > "$out"
fi
"#,
        log = log.display(),
    )
}
