//! Files owned by a single pipeline run
//!
//! Transient files are wrapped in guards that delete them on drop, so every
//! early return out of the pipeline still cleans up.

use crate::utils::remove_if_exists;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A scratch file deleted when the guard goes out of scope
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
}

impl TransientFile {
    /// Take ownership of `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now; the guard stays valid and may be reused
    pub fn remove(&self) {
        if remove_if_exists(&self.path) {
            tracing::trace!(path = ?self.path, "removed transient file");
        }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        self.remove();
    }
}

/// The durable output file
///
/// Deleted on drop unless [`OutputFile::persist`] was called, so a failed
/// run never leaves a partial clip behind.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    persisted: bool,
}

impl OutputFile {
    /// Take ownership of `path` until persisted
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    /// Location of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hand the file off to the caller
    pub fn persist(mut self) -> PathBuf {
        self.persisted = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for OutputFile {
    fn drop(&mut self) {
        if !self.persisted && remove_if_exists(&self.path) {
            tracing::debug!(path = ?self.path, "removed partial output");
        }
    }
}

/// All paths used by one conversion
///
/// Names derive from a fresh run id, so concurrent runs never share a file.
#[derive(Debug)]
pub struct PipelineArtifacts {
    /// Unique run identifier (also the output file stem)
    pub run_id: String,
    /// Trimmed source clip
    pub raw_video: TransientFile,
    /// Whole-video download used only by the fallback path
    pub full_video: TransientFile,
    /// Generated palette image
    pub palette: TransientFile,
    /// Final animated image
    pub output: OutputFile,
}

impl PipelineArtifacts {
    /// Allocate paths for a new run
    pub fn new(temp_dir: &Path, output_dir: &Path) -> Self {
        let run_id = format!("gif_{}", Uuid::new_v4().simple());
        Self {
            raw_video: TransientFile::new(temp_dir.join(format!("{run_id}.mp4"))),
            full_video: TransientFile::new(temp_dir.join(format!("{run_id}_full.mp4"))),
            palette: TransientFile::new(temp_dir.join(format!("{run_id}_palette.png"))),
            output: OutputFile::new(output_dir.join(format!("{run_id}.gif"))),
            run_id,
        }
    }

    /// Keep the output and release every transient file
    ///
    /// Returns the output path. Transient files are deleted as `self` is
    /// consumed.
    pub fn into_output(self) -> PathBuf {
        let Self { output, .. } = self;
        output.persist()
    }
}
