//! Configuration management for the Horizons backend.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables (`PORT`, and `HORIZONS_`-prefixed for the rest)
//! - Sensible defaults for all settings
//!
//! # Example
//!
//! ```ignore
//! use horizons_backend::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Listening on {}", config.bind_address());
//! ```
//!
//! # Environment Variables
//!
//! - `PORT` - Server port (default: 3000)
//! - `HORIZONS_HOST` - Server bind address (default: 0.0.0.0)
//! - `HORIZONS_GENERATION_DELAY_MS` - Image/short-video delay (default: 5000)
//! - `HORIZONS_AVATAR_DELAY_MS` - Avatar delay (default: 3000)
//! - `HORIZONS_LONG_VIDEO_DELAY_MS` - Long-video background time (default: 20000)
//! - `HORIZONS_CDN_BASE_URL` - Base URL of generated content locators
//! - `HORIZONS_AVATAR_CDN_BASE_URL` - Base URL of avatar locators
//! - `HORIZONS_MAX_UPLOAD_BYTES` - Maximum request body size for uploads (default: 100MB)
//! - `HORIZONS_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::generation::{
    DelayProfile, DEFAULT_AVATAR_CDN_BASE_URL, DEFAULT_AVATAR_DELAY, DEFAULT_CDN_BASE_URL,
    DEFAULT_GENERATION_DELAY, DEFAULT_LONG_VIDEO_DELAY,
};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default maximum upload size in bytes (100MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

const DEFAULT_GENERATION_DELAY_MS: u64 = DEFAULT_GENERATION_DELAY.as_millis() as u64;
const DEFAULT_AVATAR_DELAY_MS: u64 = DEFAULT_AVATAR_DELAY.as_millis() as u64;
const DEFAULT_LONG_VIDEO_DELAY_MS: u64 = DEFAULT_LONG_VIDEO_DELAY.as_millis() as u64;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Horizons backend - a mock AI content-generation API.
///
/// Serves canned image, video and avatar generation responses after
/// configurable artificial delays, accepts in-memory file uploads and echoes
/// settings updates.
#[derive(Parser, Debug, Clone)]
#[command(name = "horizons-backend")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HORIZONS_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Simulated Latency
    // =========================================================================
    /// Delay in milliseconds before image and short-video results are returned.
    #[arg(long, default_value_t = DEFAULT_GENERATION_DELAY_MS, env = "HORIZONS_GENERATION_DELAY_MS")]
    pub generation_delay_ms: u64,

    /// Delay in milliseconds before avatar results are returned.
    #[arg(long, default_value_t = DEFAULT_AVATAR_DELAY_MS, env = "HORIZONS_AVATAR_DELAY_MS")]
    pub avatar_delay_ms: u64,

    /// Time in milliseconds a long-video job spends in the background.
    #[arg(long, default_value_t = DEFAULT_LONG_VIDEO_DELAY_MS, env = "HORIZONS_LONG_VIDEO_DELAY_MS")]
    pub long_video_delay_ms: u64,

    // =========================================================================
    // Result Locators
    // =========================================================================
    /// Base URL for generated image and video locators.
    #[arg(long, default_value = DEFAULT_CDN_BASE_URL, env = "HORIZONS_CDN_BASE_URL")]
    pub cdn_base_url: String,

    /// Base URL for generated avatar locators.
    #[arg(long, default_value = DEFAULT_AVATAR_CDN_BASE_URL, env = "HORIZONS_AVATAR_CDN_BASE_URL")]
    pub avatar_cdn_base_url: String,

    // =========================================================================
    // Uploads
    // =========================================================================
    /// Maximum request body size in bytes for file uploads.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "HORIZONS_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "HORIZONS_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url("cdn_base_url", &self.cdn_base_url)?;
        validate_base_url("avatar_cdn_base_url", &self.avatar_cdn_base_url)?;

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Artificial delays as a [`DelayProfile`].
    pub fn delay_profile(&self) -> DelayProfile {
        DelayProfile {
            generation: Duration::from_millis(self.generation_delay_ms),
            avatar: Duration::from_millis(self.avatar_delay_ms),
            long_video: Duration::from_millis(self.long_video_delay_ms),
        }
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("{} is not a valid URL: {}", name, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!(
            "{} must use http or https, got '{}'",
            name,
            url.scheme()
        ));
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
