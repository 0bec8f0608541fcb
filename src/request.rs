//! Conversion request parsing and validation
//!
//! Turns the loosely-typed JSON body sent by the browser into a
//! [`ConversionRequest`] whose invariants the pipeline can rely on.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Default clip start when `startTime` is absent
pub const DEFAULT_START_TIME: f64 = 0.0;
/// Default clip end when `endTime` is absent
pub const DEFAULT_END_TIME: f64 = 5.0;
/// Default frame rate when `fps` is absent
pub const DEFAULT_FPS: u32 = 15;
/// Default requested width when `width` is absent
pub const DEFAULT_WIDTH: u32 = 480;

// Ordered: the first pattern that matches wins.
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)([^&\n?#]+)",
        )
        .unwrap_or_else(|e| panic!("invalid URL pattern: {e}")),
        Regex::new(r"^([a-zA-Z0-9_-]{11})$")
            .unwrap_or_else(|e| panic!("invalid bare id pattern: {e}")),
    ]
});

/// Output quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Small, 64-color clips
    Low,
    /// Balanced default
    #[default]
    Medium,
    /// Large, 256-color clips
    High,
}

/// Scale cap and palette size for a quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityProfile {
    /// Largest output width in pixels
    pub max_scale: u32,
    /// Number of colors in the generated palette
    pub palette_colors: u32,
}

impl Quality {
    /// Parse a quality name, falling back to [`Quality::Medium`] for anything unrecognized
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "low" => Quality::Low,
            "medium" => Quality::Medium,
            "high" => Quality::High,
            other => {
                tracing::debug!(quality = other, "unrecognized quality, using medium");
                Quality::Medium
            }
        }
    }

    /// Fixed profile table for this tier
    #[must_use]
    pub fn profile(self) -> QualityProfile {
        match self {
            Quality::Low => QualityProfile {
                max_scale: 320,
                palette_colors: 64,
            },
            Quality::Medium => QualityProfile {
                max_scale: 480,
                palette_colors: 128,
            },
            Quality::High => QualityProfile {
                max_scale: 640,
                palette_colors: 256,
            },
        }
    }

    /// Lowercase wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        }
    }
}

/// A JSON number or a numeric string, as HTML form values often arrive
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// Plain JSON number
    Number(f64),
    /// Number encoded as a string (e.g., "2.5")
    Text(String),
}

impl Numeric {
    fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::InvalidInput(format!("{field} must be a number, got {s:?}"))
            })?,
        };
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!("{field} must be finite")));
        }
        Ok(value)
    }
}

/// Raw request body for `POST /convert`
///
/// All fields are optional; absent ones take the documented defaults during
/// [`RawConversionRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawConversionRequest {
    /// YouTube URL or bare 11-character video id
    #[serde(default)]
    pub url: Option<String>,
    /// Clip start in seconds (default: 0)
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub start_time: Option<Numeric>,
    /// Clip end in seconds (default: 5)
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub end_time: Option<Numeric>,
    /// Output frame rate (default: 15)
    #[serde(default)]
    #[schema(value_type = Option<u32>)]
    pub fps: Option<Numeric>,
    /// Requested output width, capped by the quality tier (default: 480)
    #[serde(default)]
    #[schema(value_type = Option<u32>)]
    pub width: Option<Numeric>,
    /// "low", "medium" or "high" (default: "medium"); any other value,
    /// including non-strings, means "medium"
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub quality: Option<serde_json::Value>,
}

/// A validated conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// URL as supplied by the caller
    pub url: String,
    /// Extracted YouTube video id
    pub video_id: String,
    /// Clip start in seconds
    pub start_time: f64,
    /// Clip end in seconds
    pub end_time: f64,
    /// Output frame rate
    pub fps: u32,
    /// Requested output width before quality capping
    pub width: u32,
    /// Quality tier
    pub quality: Quality,
}

impl ConversionRequest {
    /// Clip length in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Width actually applied: requested width clamped to the tier's cap
    #[must_use]
    pub fn scale_width(&self) -> u32 {
        self.width.min(self.quality.profile().max_scale)
    }

    /// Palette size for the request's tier
    #[must_use]
    pub fn palette_colors(&self) -> u32 {
        self.quality.profile().palette_colors
    }

    /// Canonical watch URL handed to the downloader
    #[must_use]
    pub fn source_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl RawConversionRequest {
    /// Parse a request body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "rejecting malformed request body");
            Error::InvalidInput("Invalid JSON input".to_string())
        })
    }

    /// Apply defaults and validate against the maximum clip length
    pub fn validate(self, max_duration_secs: f64) -> Result<ConversionRequest> {
        let url = self.url.unwrap_or_default();
        let video_id =
            extract_video_id(&url).ok_or_else(|| Error::InvalidUrl(url.clone()))?;

        let start_time = optional_f64(&self.start_time, "startTime", DEFAULT_START_TIME)?;
        let end_time = optional_f64(&self.end_time, "endTime", DEFAULT_END_TIME)?;
        validate_duration(start_time, end_time, max_duration_secs)?;

        if start_time < 0.0 {
            return Err(Error::InvalidInput(
                "startTime must not be negative".to_string(),
            ));
        }

        let fps = optional_u32(&self.fps, "fps", DEFAULT_FPS)?;
        let width = optional_u32(&self.width, "width", DEFAULT_WIDTH)?;
        let quality = match &self.quality {
            Some(serde_json::Value::String(name)) => Quality::parse_lenient(name),
            Some(serde_json::Value::Null) | None => Quality::default(),
            Some(other) => {
                tracing::debug!(quality = %other, "non-string quality, using medium");
                Quality::default()
            }
        };

        Ok(ConversionRequest {
            url,
            video_id,
            start_time,
            end_time,
            fps,
            width,
            quality,
        })
    }
}

/// Extract a YouTube video id from any supported URL shape
///
/// Recognizes watch, short (`youtu.be`), embed, `/v/` and shorts URLs, and
/// a bare 11-character id.
///
/// # Examples
///
/// ```
/// use yt2gif::request::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://example.com/"), None);
/// ```
#[must_use]
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reject clips that are empty, reversed, or longer than `max_duration_secs`
pub fn validate_duration(start_time: f64, end_time: f64, max_duration_secs: f64) -> Result<()> {
    let duration = end_time - start_time;
    if duration <= 0.0 || duration > max_duration_secs {
        return Err(Error::InvalidDuration {
            duration,
            max: max_duration_secs,
        });
    }
    Ok(())
}

fn optional_f64(value: &Option<Numeric>, field: &str, default: f64) -> Result<f64> {
    value
        .as_ref()
        .map_or(Ok(default), |n| n.to_f64(field))
}

// Fractions truncate; anything below one is raised to one.
fn optional_u32(value: &Option<Numeric>, field: &str, default: u32) -> Result<u32> {
    let Some(n) = value else {
        return Ok(default);
    };
    let raw = n.to_f64(field)?.trunc();
    Ok(raw.clamp(1.0, f64::from(u32::MAX)) as u32)
}
