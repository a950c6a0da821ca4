//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Demo session configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `DATA_DIR` — profile storage directory (default: `".storefront"`)
/// - `CATALOG_LATENCY_MS` — simulated load latency (default: `500`)
/// - `CATALOG_FAILURE_RATE` — fraction of loads that fail (default: `0.1`)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub data_dir: PathBuf,
    pub catalog_latency: Duration,
    pub catalog_failure_rate: f64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".storefront")),
            catalog_latency: Duration::from_millis(
                std::env::var("CATALOG_LATENCY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
            ),
            catalog_failure_rate: std::env::var("CATALOG_FAILURE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: PathBuf::from(".storefront"),
            catalog_latency: Duration::from_millis(500),
            catalog_failure_rate: 0.1,
        }
    }
}
