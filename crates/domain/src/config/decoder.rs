use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecoderConfig {
    /// Resolver used for client reverse lookups (`host:port`).
    #[serde(default = "default_resolver")]
    pub resolver: String,

    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Freshness window of a cached reverse lookup.
    #[serde(default = "default_host_ttl_secs")]
    pub host_ttl_secs: u64,

    /// Capacity of each consumer's record channel.
    #[serde(default = "default_consumer_buffer_size")]
    pub consumer_buffer_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            resolver: default_resolver(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            host_ttl_secs: default_host_ttl_secs(),
            consumer_buffer_size: default_consumer_buffer_size(),
        }
    }
}

fn default_resolver() -> String {
    "127.0.0.1:53".to_string()
}

fn default_lookup_timeout_ms() -> u64 {
    1000
}

fn default_host_ttl_secs() -> u64 {
    3600
}

fn default_consumer_buffer_size() -> usize {
    1000
}
