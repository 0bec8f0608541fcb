//! Mock tools and a temp-dir harness shared by pipeline and API tests

use super::GifPipeline;
use crate::config::{ConversionConfig, StorageConfig};
use crate::request::{ConversionRequest, Numeric, RawConversionRequest};
use crate::tools::{BayerDither, CommandOutput, ScaleFilter, Transcoder, VideoFetcher};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// How a mocked invocation behaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Behavior {
    /// Write the output file and exit 0
    Succeed,
    /// Exit 1 without writing anything
    Fail,
    /// Exit 0 but never write the output file
    ExitZeroNoFile,
    /// Write a partial output file, then exit 1
    FailWithPartialFile,
}

pub(crate) fn act(behavior: Behavior, output: &Path, label: &str) -> CommandOutput {
    match behavior {
        Behavior::Succeed => {
            std::fs::write(output, b"GIF89a-fake-bytes").unwrap();
            CommandOutput::ok(format!("{label}: done"))
        }
        Behavior::Fail => CommandOutput::failed(Some(1), format!("{label}: boom")),
        Behavior::ExitZeroNoFile => CommandOutput::ok(format!("{label}: nothing written")),
        Behavior::FailWithPartialFile => {
            std::fs::write(output, b"partial").unwrap();
            CommandOutput::failed(Some(1), format!("{label}: interrupted"))
        }
    }
}

/// Every call the mocks observed, in order
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Section { url: String, start: f64, end: f64, output: PathBuf },
    Full { max_height: u32, output: PathBuf },
    Trim { input: PathBuf, start: f64, duration: f64, output: PathBuf },
    Palette { input: PathBuf, scale: ScaleFilter, colors: u32, output: PathBuf },
    Encode { palette: PathBuf, scale: ScaleFilter, dither: BayerDither, output: PathBuf },
}

pub(crate) type CallLog = Arc<Mutex<Vec<Call>>>;

pub(crate) struct MockFetcher {
    pub section: Behavior,
    pub full: Behavior,
    pub calls: CallLog,
}

#[async_trait]
impl VideoFetcher for MockFetcher {
    async fn fetch_section(&self, url: &str, start: f64, end: f64, output: &Path) -> CommandOutput {
        self.calls.lock().unwrap().push(Call::Section {
            url: url.to_string(),
            start,
            end,
            output: output.to_path_buf(),
        });
        act(self.section, output, "section")
    }

    async fn fetch_full(&self, _url: &str, max_height: u32, output: &Path) -> CommandOutput {
        self.calls.lock().unwrap().push(Call::Full {
            max_height,
            output: output.to_path_buf(),
        });
        act(self.full, output, "full")
    }

    fn name(&self) -> &'static str {
        "mock-fetcher"
    }
}

pub(crate) struct MockTranscoder {
    pub trim: Behavior,
    pub palette: Behavior,
    pub encode: Behavior,
    pub calls: CallLog,
}

#[async_trait]
impl Transcoder for MockTranscoder {
    async fn trim_copy(&self, input: &Path, start: f64, duration: f64, output: &Path) -> CommandOutput {
        // The fallback must hand over an existing full download
        assert!(input.exists(), "trim input should exist");
        self.calls.lock().unwrap().push(Call::Trim {
            input: input.to_path_buf(),
            start,
            duration,
            output: output.to_path_buf(),
        });
        act(self.trim, output, "trim")
    }

    async fn generate_palette(
        &self,
        input: &Path,
        scale: ScaleFilter,
        colors: u32,
        output: &Path,
    ) -> CommandOutput {
        assert!(input.exists(), "palette input should exist");
        self.calls.lock().unwrap().push(Call::Palette {
            input: input.to_path_buf(),
            scale,
            colors,
            output: output.to_path_buf(),
        });
        act(self.palette, output, "palette")
    }

    async fn encode_with_palette(
        &self,
        input: &Path,
        palette: &Path,
        scale: ScaleFilter,
        dither: BayerDither,
        output: &Path,
    ) -> CommandOutput {
        assert!(input.exists(), "encode input should exist");
        assert!(palette.exists(), "palette should exist before encode");
        self.calls.lock().unwrap().push(Call::Encode {
            palette: palette.to_path_buf(),
            scale,
            dither,
            output: output.to_path_buf(),
        });
        act(self.encode, output, "encode")
    }

    fn name(&self) -> &'static str {
        "mock-transcoder"
    }
}

pub(crate) struct Harness {
    pub pipeline: Arc<GifPipeline>,
    pub calls: CallLog,
    pub temp_dir: PathBuf,
    pub output_dir: PathBuf,
    _root: TempDir,
}

#[derive(Clone, Copy)]
pub(crate) struct Behaviors {
    pub section: Behavior,
    pub full: Behavior,
    pub trim: Behavior,
    pub palette: Behavior,
    pub encode: Behavior,
}

impl Default for Behaviors {
    fn default() -> Self {
        Self {
            section: Behavior::Succeed,
            full: Behavior::Succeed,
            trim: Behavior::Succeed,
            palette: Behavior::Succeed,
            encode: Behavior::Succeed,
        }
    }
}

pub(crate) fn harness(behaviors: Behaviors) -> Harness {
    let root = tempfile::tempdir().unwrap();
    let temp_dir = root.path().join("temp");
    let output_dir = root.path().join("gifs");
    std::fs::create_dir_all(&temp_dir).unwrap();
    std::fs::create_dir_all(&output_dir).unwrap();

    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let fetcher = MockFetcher {
        section: behaviors.section,
        full: behaviors.full,
        calls: calls.clone(),
    };
    let transcoder = MockTranscoder {
        trim: behaviors.trim,
        palette: behaviors.palette,
        encode: behaviors.encode,
        calls: calls.clone(),
    };
    let storage = StorageConfig {
        output_dir: output_dir.clone(),
        temp_dir: temp_dir.clone(),
        public_prefix: "gifs".to_string(),
    };

    Harness {
        pipeline: Arc::new(GifPipeline::new(
            Arc::new(fetcher),
            Arc::new(transcoder),
            storage,
            ConversionConfig::default(),
        )),
        calls,
        temp_dir,
        output_dir,
        _root: root,
    }
}

impl Harness {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn temp_entries(&self) -> usize {
        std::fs::read_dir(&self.temp_dir).unwrap().count()
    }

    pub fn output_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.output_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}

/// `{url:"https://youtu.be/abc12345678", startTime:2, endTime:7, fps:10, width:400, quality:"high"}`
pub(crate) fn sample_request() -> ConversionRequest {
    RawConversionRequest {
        url: Some("https://youtu.be/abc12345678".to_string()),
        start_time: Some(Numeric::Number(2.0)),
        end_time: Some(Numeric::Number(7.0)),
        fps: Some(Numeric::Number(10.0)),
        width: Some(Numeric::Number(400.0)),
        quality: Some("high".into()),
    }
    .validate(30.0)
    .unwrap()
}
