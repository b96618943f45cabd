use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::cloak::CloakConfig;
use super::decoder::DecoderConfig;
use super::errors::ConfigError;
use super::influx::InfluxConfig;
use super::input::{InputConfig, InputKind};
use super::logging::LoggingConfig;

const LOCAL_CONFIG_PATH: &str = "tapguard.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/tapguard/config.toml";

/// Main configuration structure for Tapguard
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// dnstap frame source
    #[serde(default)]
    pub input: InputConfig,

    /// Frame decoding and client reverse lookups
    #[serde(default)]
    pub decoder: DecoderConfig,

    /// InfluxDB metrics consumer
    #[serde(default)]
    pub influx: InfluxConfig,

    /// CNAME-cloaking defense engine
    #[serde(default)]
    pub cloak: CloakConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. tapguard.toml in current directory
    /// 3. /etc/tapguard/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.input_path {
            self.input.path = path;
        }
        if overrides.input_is_file {
            self.input.kind = InputKind::File;
        }
        if let Some(url) = overrides.influx_url {
            self.influx.url = url;
        }
        if let Some(token) = overrides.influx_token {
            self.influx.token = token;
        }
        if let Some(org) = overrides.influx_org {
            self.influx.org = org;
        }
        if let Some(bucket) = overrides.influx_bucket {
            self.influx.bucket = bucket;
        }
        if let Some(measurement) = overrides.influx_measurement {
            self.influx.measurement = measurement;
        }
        if let Some(batch) = overrides.influx_batch_size {
            self.influx.batch_size = batch;
        }
        if let Some(flush) = overrides.influx_flush_interval_ms {
            self.influx.flush_interval_ms = flush;
        }
        if overrides.disable_influx {
            self.influx.enabled = false;
        }
        if overrides.enable_cloak {
            self.cloak.enabled = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.path.trim().is_empty() {
            return Err(invalid("input.path", "must not be empty"));
        }
        if self.input.buffer_size == 0 {
            return Err(invalid("input.buffer_size", "must be greater than 0"));
        }
        if self.decoder.consumer_buffer_size == 0 {
            return Err(invalid("decoder.consumer_buffer_size", "must be greater than 0"));
        }
        if self.decoder.resolver.parse::<SocketAddr>().is_err() {
            return Err(invalid(
                "decoder.resolver",
                format!("'{}' is not a socket address", self.decoder.resolver),
            ));
        }

        if self.influx.enabled {
            if self.influx.url.trim().is_empty() {
                return Err(invalid("influx.url", "must not be empty"));
            }
            if self.influx.batch_size == 0 {
                return Err(invalid("influx.batch_size", "must be greater than 0"));
            }
            if self.influx.buffer_size == 0 {
                return Err(invalid("influx.buffer_size", "must be greater than 0"));
            }
        }

        if self.cloak.enabled {
            for (field, path) in [
                ("cloak.blocked_file", &self.cloak.blocked_file),
                ("cloak.whitelist_file", &self.cloak.whitelist_file),
                ("cloak.blacklist_file", &self.cloak.blacklist_file),
            ] {
                if path.trim().is_empty() {
                    return Err(invalid(field, "must not be empty"));
                }
            }
            if self.cloak.port == 0 {
                return Err(invalid("cloak.port", "cannot be 0"));
            }
            if self.cloak.buffer_size == 0 {
                return Err(invalid("cloak.buffer_size", "must be greater than 0"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field,
        reason: reason.into(),
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_path: Option<String>,
    pub input_is_file: bool,
    pub influx_url: Option<String>,
    pub influx_token: Option<String>,
    pub influx_org: Option<String>,
    pub influx_bucket: Option<String>,
    pub influx_measurement: Option<String>,
    pub influx_batch_size: Option<usize>,
    pub influx_flush_interval_ms: Option<u64>,
    pub disable_influx: bool,
    pub enable_cloak: bool,
    pub log_level: Option<String>,
}
