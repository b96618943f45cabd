use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Frame decoding failed: {0}")]
    Framing(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Failed to load block list {path}: {reason}")]
    BlockListLoad { path: String, reason: String },

    #[error("Cloak defense engine is no longer accepting commands")]
    EngineStopped,

    #[error("Actuator command failed: {0}")]
    Actuator(String),

    #[error("Hostname lookup failed: {0}")]
    HostnameLookup(String),

    #[error("Metrics write failed: {0}")]
    MetricsWrite(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
