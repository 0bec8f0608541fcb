//! Core result and reply types

use crate::utils::format_bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A finished clip handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// Public reference to the clip (e.g., "gifs/gif_3f2c….gif")
    pub output_ref: String,
    /// Size of the clip in bytes
    pub byte_size: u64,
}

impl ConversionOutput {
    /// Human readable size (e.g., "1.50 MB")
    #[must_use]
    pub fn byte_size_formatted(&self) -> String {
        format_bytes(self.byte_size)
    }
}

/// JSON reply of `POST /convert`
///
/// Success carries the clip reference and sizes; failure carries only the
/// error message.
///
/// ```json
/// {"success": true, "gifUrl": "gifs/gif_ab12.gif", "fileSize": 1536, "fileSizeFormatted": "1.50 KB"}
/// {"success": false, "error": "Invalid YouTube URL"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReply {
    /// Whether the conversion produced a clip
    pub success: bool,
    /// Public reference to the produced clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    /// Clip size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Clip size as a human readable string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_formatted: Option<String>,
    /// Error message when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionReply {
    /// Reply for a produced clip
    pub fn success(output: &ConversionOutput) -> Self {
        Self {
            success: true,
            gif_url: Some(output.output_ref.clone()),
            file_size: Some(output.byte_size),
            file_size_formatted: Some(output.byte_size_formatted()),
            error: None,
        }
    }

    /// Reply carrying only an error message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            gif_url: None,
            file_size: None,
            file_size_formatted: None,
            error: Some(message.into()),
        }
    }
}
