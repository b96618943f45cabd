use serde::{Deserialize, Serialize};

/// CNAME-cloaking defense configuration.
///
/// The three list files compose the block set as
/// `(blocked ∪ blacklist) − whitelist`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloakConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_blocked_file")]
    pub blocked_file: String,

    #[serde(default = "default_whitelist_file")]
    pub whitelist_file: String,

    #[serde(default = "default_blacklist_file")]
    pub blacklist_file: String,

    /// Reload listener bind address. Listens on every interface by default.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Capacity of the serialized command channel and the actuator queue.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    #[serde(default = "default_unbound_control")]
    pub unbound_control: String,

    /// Extra arguments placed before every command (e.g. `-c /etc/unbound/unbound.conf`).
    #[serde(default)]
    pub unbound_control_args: Vec<String>,

    #[serde(default = "default_zone_type")]
    pub zone_type: String,
}

impl Default for CloakConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            blocked_file: default_blocked_file(),
            whitelist_file: default_whitelist_file(),
            blacklist_file: default_blacklist_file(),
            bind_address: default_bind_address(),
            port: default_port(),
            buffer_size: default_buffer_size(),
            unbound_control: default_unbound_control(),
            unbound_control_args: vec![],
            zone_type: default_zone_type(),
        }
    }
}

fn default_blocked_file() -> String {
    "/etc/unbound/blocked.conf".to_string()
}

fn default_whitelist_file() -> String {
    "/etc/unbound/whitelist.conf".to_string()
}

fn default_blacklist_file() -> String {
    "/etc/unbound/blacklist.conf".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8053
}

fn default_buffer_size() -> usize {
    1000
}

fn default_unbound_control() -> String {
    "unbound-control".to_string()
}

fn default_zone_type() -> String {
    "always_nxdomain".to_string()
}
