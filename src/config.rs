//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the store slots live on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("farmlink").to_string_lossy().to_string())
        .unwrap_or_else(|| "./farmlink_data".to_string())
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Checkout and order settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutConfig {
    /// Tax applied to the cart subtotal, as a fraction
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,

    /// Days between placing an order and its delivery estimate
    #[serde(default = "default_delivery_days")]
    pub delivery_days: u32,

    #[serde(default = "default_order_id_prefix")]
    pub order_id_prefix: String,
}

fn default_tax_rate() -> Decimal {
    Decimal::new(5, 2) // 5%
}

fn default_delivery_days() -> u32 {
    5
}

/// Upper bound accepted for `checkout.delivery_days` (ten years)
pub const MAX_DELIVERY_DAYS: u32 = 3650;

fn parse_delivery_days(raw: &str) -> Result<u32, String> {
    let days: u32 = raw.trim().parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    if days > MAX_DELIVERY_DAYS {
        return Err(format!("must be at most {}", MAX_DELIVERY_DAYS));
    }
    Ok(days)
}

fn default_order_id_prefix() -> String {
    "FM".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            delivery_days: default_delivery_days(),
            order_id_prefix: default_order_id_prefix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate().map_err(|error| ConfigError::Invalid {
            path: path.to_path_buf(),
            error,
        })?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.checkout.delivery_days > MAX_DELIVERY_DAYS {
            return Err(format!(
                "checkout.delivery_days = {} exceeds {}",
                self.checkout.delivery_days, MAX_DELIVERY_DAYS
            ));
        }
        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("farmlink").join("config.toml")),
            Some(PathBuf::from("./farmlink.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("FARMLINK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Ok(rate) = std::env::var("FARMLINK_TAX_RATE") {
            match rate.parse() {
                Ok(r) => self.checkout.tax_rate = r,
                Err(e) => tracing::warn!("Ignoring FARMLINK_TAX_RATE={}: {}", rate, e),
            }
        }
        if let Ok(days) = std::env::var("FARMLINK_DELIVERY_DAYS") {
            match parse_delivery_days(&days) {
                Ok(d) => self.checkout.delivery_days = d,
                Err(e) => tracing::warn!("Ignoring FARMLINK_DELIVERY_DAYS={}: {}", days, e),
            }
        }

        if let Ok(level) = std::env::var("FARMLINK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FARMLINK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config file {path:?}: {error}")]
    Invalid { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# FarmLink Configuration
#
# Environment variables override these settings:
# - FARMLINK_DATA_DIR
# - FARMLINK_TAX_RATE
# - FARMLINK_DELIVERY_DAYS
# - FARMLINK_LOG_LEVEL
# - FARMLINK_LOG_FORMAT

[storage]
# Directory holding the user, cart and order slots
data_dir = "~/.local/share/farmlink"

[checkout]
# Tax on the cart subtotal (fraction, quoted to keep it exact)
tax_rate = "0.05"

# Days from order placement to estimated delivery
delivery_days = 5

# Prefix of generated order IDs
order_id_prefix = "FM"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.checkout.tax_rate, Decimal::from_str("0.05").unwrap());
        assert_eq!(config.checkout.delivery_days, 5);
        assert_eq!(config.checkout.order_id_prefix, "FM");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [checkout]
            delivery_days = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.checkout.delivery_days, 3);
        assert_eq!(config.checkout.tax_rate, Decimal::new(5, 2));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.checkout, CheckoutConfig::default());
        assert_eq!(config.storage.data_dir, "~/.local/share/farmlink");
    }

    #[test]
    fn test_data_path() {
        let config = StorageConfig {
            data_dir: "/var/lib/farmlink".to_string(),
        };
        assert_eq!(config.data_path(), PathBuf::from("/var/lib/farmlink"));

        let config = StorageConfig {
            data_dir: "~/.local/share/farmlink".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.data_path(), home.join(".local/share/farmlink"));
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("farmlink.toml");
        std::fs::write(&path, "[checkout]\ntax_rate = \"0.18\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.checkout.tax_rate, Decimal::from_str("0.18").unwrap());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[checkout\n").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_rejects_oversized_delivery_days() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("farmlink.toml");
        std::fs::write(&path, "[checkout]\ndelivery_days = 4000000000\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid { .. })));

        std::fs::write(&path, "[checkout]\ndelivery_days = 3650\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().checkout.delivery_days, MAX_DELIVERY_DAYS);
    }

    #[test]
    fn test_parse_delivery_days() {
        assert_eq!(parse_delivery_days(" 7 "), Ok(7));
        assert!(parse_delivery_days("soon").is_err());
        assert!(parse_delivery_days("-1").is_err());
        assert!(parse_delivery_days("3651").is_err());
    }
}
