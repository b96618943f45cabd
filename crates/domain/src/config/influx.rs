use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InfluxConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub org: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_measurement")]
    pub measurement: String,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// Capacity of the channel between the consumer and the HTTP writer.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_url(),
            token: String::new(),
            org: String::new(),
            bucket: default_bucket(),
            measurement: default_measurement(),
            batch_size: default_batch_size(),
            flush_interval_ms: default_flush_interval_ms(),
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_url() -> String {
    "http://localhost:8086".to_string()
}

fn default_bucket() -> String {
    "dns".to_string()
}

fn default_measurement() -> String {
    "queries".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_flush_interval_ms() -> u64 {
    1000
}

fn default_buffer_size() -> usize {
    1000
}
