use super::{DnsMessage, DnstapMessage, TapMessageType};
use bytes::Bytes;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Query,
    Response,
}

/// One decoded dnstap event.
///
/// Built once by the decoder and shared read-only (behind an `Arc`) with
/// every consumer.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub timestamp: DateTime<Utc>,
    pub direction: Option<Direction>,
    /// Wire-format DNS message selected from the query or response side.
    pub raw_message: Option<Bytes>,
    /// Unpacked DNS message; absent when missing or malformed.
    pub dns: Option<DnsMessage>,
    /// Reverse-resolved client host, or the literal address on failure.
    pub client_host: String,
    /// The full tap message (addresses, ports, socket family/protocol, zone).
    pub tap: DnstapMessage,
}

impl TransactionRecord {
    pub fn new(tap: DnstapMessage, dns: Option<DnsMessage>, client_host: String) -> Self {
        Self {
            timestamp: tap.timestamp(),
            direction: tap.direction(),
            raw_message: tap.dns_payload().cloned(),
            dns,
            client_host,
            tap,
        }
    }

    pub fn message_type(&self) -> Option<TapMessageType> {
        self.tap.message_type
    }

    /// First question name, when the DNS message parsed and had one.
    pub fn qname(&self) -> Option<&str> {
        self.dns
            .as_ref()
            .and_then(|m| m.first_question())
            .map(|q| q.name.as_str())
    }
}
