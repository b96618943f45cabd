pub mod cloak;
pub mod decoder;
pub mod errors;
pub mod influx;
pub mod input;
pub mod logging;
pub mod root;

pub use cloak::CloakConfig;
pub use decoder::DecoderConfig;
pub use errors::ConfigError;
pub use influx::InfluxConfig;
pub use input::{InputConfig, InputKind};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
