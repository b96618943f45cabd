//! dnstap `Message` model.
//!
//! Mirrors the protobuf schema field for field; every field is optional on
//! the wire, so every field is an `Option` here. Decoding lives in the
//! infrastructure layer.

use super::Direction;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapMessageType {
    AuthQuery,
    AuthResponse,
    ResolverQuery,
    ResolverResponse,
    ClientQuery,
    ClientResponse,
    ForwarderQuery,
    ForwarderResponse,
    StubQuery,
    StubResponse,
    ToolQuery,
    ToolResponse,
    UpdateQuery,
    UpdateResponse,
    Unknown(i32),
}

impl TapMessageType {
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => TapMessageType::AuthQuery,
            2 => TapMessageType::AuthResponse,
            3 => TapMessageType::ResolverQuery,
            4 => TapMessageType::ResolverResponse,
            5 => TapMessageType::ClientQuery,
            6 => TapMessageType::ClientResponse,
            7 => TapMessageType::ForwarderQuery,
            8 => TapMessageType::ForwarderResponse,
            9 => TapMessageType::StubQuery,
            10 => TapMessageType::StubResponse,
            11 => TapMessageType::ToolQuery,
            12 => TapMessageType::ToolResponse,
            13 => TapMessageType::UpdateQuery,
            14 => TapMessageType::UpdateResponse,
            other => TapMessageType::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TapMessageType::AuthQuery => "AUTH_QUERY",
            TapMessageType::AuthResponse => "AUTH_RESPONSE",
            TapMessageType::ResolverQuery => "RESOLVER_QUERY",
            TapMessageType::ResolverResponse => "RESOLVER_RESPONSE",
            TapMessageType::ClientQuery => "CLIENT_QUERY",
            TapMessageType::ClientResponse => "CLIENT_RESPONSE",
            TapMessageType::ForwarderQuery => "FORWARDER_QUERY",
            TapMessageType::ForwarderResponse => "FORWARDER_RESPONSE",
            TapMessageType::StubQuery => "STUB_QUERY",
            TapMessageType::StubResponse => "STUB_RESPONSE",
            TapMessageType::ToolQuery => "TOOL_QUERY",
            TapMessageType::ToolResponse => "TOOL_RESPONSE",
            TapMessageType::UpdateQuery => "UPDATE_QUERY",
            TapMessageType::UpdateResponse => "UPDATE_RESPONSE",
            TapMessageType::Unknown(_) => "UNKNOWN",
        }
    }

    /// Query/response classification. UPDATE and unknown sub-types have none
    /// and take the wall-clock fallback path.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            TapMessageType::AuthQuery
            | TapMessageType::ResolverQuery
            | TapMessageType::ClientQuery
            | TapMessageType::ForwarderQuery
            | TapMessageType::StubQuery
            | TapMessageType::ToolQuery => Some(Direction::Query),

            TapMessageType::AuthResponse
            | TapMessageType::ResolverResponse
            | TapMessageType::ClientResponse
            | TapMessageType::ForwarderResponse
            | TapMessageType::StubResponse
            | TapMessageType::ToolResponse => Some(Direction::Response),

            TapMessageType::UpdateQuery
            | TapMessageType::UpdateResponse
            | TapMessageType::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketFamily {
    Inet,
    Inet6,
    Unknown(i32),
}

impl SocketFamily {
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => SocketFamily::Inet,
            2 => SocketFamily::Inet6,
            other => SocketFamily::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocketFamily::Inet => "INET",
            SocketFamily::Inet6 => "INET6",
            SocketFamily::Unknown(_) => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketProtocol {
    Udp,
    Tcp,
    Dot,
    Doh,
    DnsCryptUdp,
    DnsCryptTcp,
    Doq,
    Unknown(i32),
}

impl SocketProtocol {
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => SocketProtocol::Udp,
            2 => SocketProtocol::Tcp,
            3 => SocketProtocol::Dot,
            4 => SocketProtocol::Doh,
            5 => SocketProtocol::DnsCryptUdp,
            6 => SocketProtocol::DnsCryptTcp,
            7 => SocketProtocol::Doq,
            other => SocketProtocol::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocketProtocol::Udp => "UDP",
            SocketProtocol::Tcp => "TCP",
            SocketProtocol::Dot => "DOT",
            SocketProtocol::Doh => "DOH",
            SocketProtocol::DnsCryptUdp => "DNSCryptUDP",
            SocketProtocol::DnsCryptTcp => "DNSCryptTCP",
            SocketProtocol::Doq => "DOQ",
            SocketProtocol::Unknown(_) => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnstapMessage {
    pub message_type: Option<TapMessageType>,
    pub socket_family: Option<SocketFamily>,
    pub socket_protocol: Option<SocketProtocol>,
    pub query_address: Option<Bytes>,
    pub response_address: Option<Bytes>,
    pub query_port: Option<u32>,
    pub response_port: Option<u32>,
    pub query_time_sec: Option<u64>,
    pub query_time_nsec: Option<u32>,
    pub query_message: Option<Bytes>,
    pub query_zone: Option<Bytes>,
    pub response_time_sec: Option<u64>,
    pub response_time_nsec: Option<u32>,
    pub response_message: Option<Bytes>,
}

impl DnstapMessage {
    pub fn direction(&self) -> Option<Direction> {
        self.message_type.and_then(|t| t.direction())
    }

    /// Event time taken from the side of the transaction this message
    /// describes; wall clock when the sub-type is neither or the time
    /// fields are missing.
    pub fn timestamp(&self) -> DateTime<Utc> {
        let stamp = match self.direction() {
            Some(Direction::Query) => unix_time(self.query_time_sec, self.query_time_nsec),
            Some(Direction::Response) => unix_time(self.response_time_sec, self.response_time_nsec),
            None => None,
        };
        stamp.unwrap_or_else(Utc::now)
    }

    /// Wire-format DNS message for the side this message describes.
    pub fn dns_payload(&self) -> Option<&Bytes> {
        match self.direction() {
            Some(Direction::Query) => self.query_message.as_ref(),
            Some(Direction::Response) => self.response_message.as_ref(),
            None => None,
        }
    }
}

fn unix_time(sec: Option<u64>, nsec: Option<u32>) -> Option<DateTime<Utc>> {
    let (sec, nsec) = (sec?, nsec?);
    DateTime::from_timestamp(i64::try_from(sec).ok()?, nsec)
}

/// Interpret raw address bytes as an IP address.
pub fn parse_address(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        4 => {
            let octets: [u8; 4] = bytes.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        16 => {
            let octets: [u8; 16] = bytes.try_into().ok()?;
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}

/// Textual form of raw address bytes.
///
/// Empty input yields an empty string; lengths other than 4 or 16 are
/// rendered as `?` followed by the hex bytes.
pub fn format_address(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    match parse_address(bytes) {
        Some(ip) => ip.to_string(),
        None => {
            let mut out = String::with_capacity(1 + bytes.len() * 2);
            out.push('?');
            for b in bytes {
                let _ = write!(out, "{:02x}", b);
            }
            out
        }
    }
}
