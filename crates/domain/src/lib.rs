//! Tapguard Domain Layer
pub mod actuator;
pub mod block_set;
pub mod cloak;
pub mod config;
pub mod dns_message;
pub mod dnstap;
pub mod errors;
pub mod record_type;
pub mod transaction;

pub use actuator::ActuatorCommand;
pub use block_set::{normalize_domain, BlockSet};
pub use cloak::{ChainOutcome, CloakMap, CnameChain};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{DnsAnswer, DnsMessage, DnsQuestion, ResponseCode};
pub use dnstap::{format_address, parse_address, DnstapMessage, SocketFamily, SocketProtocol, TapMessageType};
pub use errors::DomainError;
pub use record_type::RecordType;
pub use transaction::{Direction, TransactionRecord};
