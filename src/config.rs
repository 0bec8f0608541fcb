//! Configuration types for yt2gif

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, path::PathBuf, time::Duration};

/// HTTP API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:8080)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Output and working directories
///
/// Produced clips land in `output_dir` and are served publicly under
/// `public_prefix`. Intermediate files live in `temp_dir` only for the
/// duration of a single conversion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Durable output directory (default: "./gifs")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Transient working directory (default: "./temp")
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// URL path prefix under which output files are served (default: "gifs")
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            temp_dir: default_temp_dir(),
            public_prefix: default_public_prefix(),
        }
    }
}

/// External tool paths and invocation limits
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Path to ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for external binaries if explicit paths not set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Upper bound on a single external tool invocation (default: 300 seconds)
    #[serde(default = "default_command_timeout", with = "duration_serde")]
    pub command_timeout: Duration,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            search_path: true,
            command_timeout: default_command_timeout(),
        }
    }
}

/// Conversion limits and encoder constants
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Longest clip accepted, in seconds (default: 30)
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: f64,

    /// Height cap for the full-download fallback (default: 720)
    #[serde(default = "default_fallback_max_height")]
    pub fallback_max_height: u32,

    /// Bayer dither scale passed to paletteuse, 0-5 (default: 5)
    #[serde(default = "default_bayer_scale")]
    pub bayer_scale: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
            fallback_max_height: default_fallback_max_height(),
            bayer_scale: default_bayer_scale(),
        }
    }
}

/// Main configuration for the yt2gif service
///
/// Every field has a default, so an empty JSON object (or no file at all)
/// yields a working local setup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output and working directories
    #[serde(default)]
    pub storage: StorageConfig,

    /// External tool locations and limits
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Conversion limits
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let max = self.conversion.max_duration_secs;
        if max.is_nan() || max <= 0.0 {
            return Err(Error::Config {
                message: "max_duration_secs must be positive".to_string(),
                key: Some("max_duration_secs".to_string()),
            });
        }
        if self.conversion.bayer_scale > 5 {
            return Err(Error::Config {
                message: "bayer_scale must be between 0 and 5".to_string(),
                key: Some("bayer_scale".to_string()),
            });
        }
        if self.tools.command_timeout.is_zero() {
            return Err(Error::Config {
                message: "command_timeout must be at least one second".to_string(),
                key: Some("command_timeout".to_string()),
            });
        }
        Ok(())
    }

    /// Create the output and temporary directories if they are missing
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.storage.output_dir, &self.storage.temp_dir] {
            std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./gifs")
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("./temp")
}

fn default_public_prefix() -> String {
    "gifs".to_string()
}

fn default_command_timeout() -> Duration {
    Duration::from_secs(300)
}

fn default_max_duration_secs() -> f64 {
    30.0
}

fn default_fallback_max_height() -> u32 {
    720
}

fn default_bayer_scale() -> u8 {
    5
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
