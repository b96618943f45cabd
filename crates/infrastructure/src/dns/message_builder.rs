//! Query construction for the reverse lookups the decoder issues.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::IpAddr;
use std::str::FromStr;
use tapguard_domain::DomainError;

pub struct MessageBuilder;

impl MessageBuilder {
    /// `in-addr.arpa` / `ip6.arpa` name for `ip`, fully qualified.
    pub fn reverse_name(ip: &IpAddr) -> String {
        match ip {
            IpAddr::V4(ipv4) => {
                let o = ipv4.octets();
                format!("{}.{}.{}.{}.in-addr.arpa.", o[3], o[2], o[1], o[0])
            }
            IpAddr::V6(ipv6) => {
                let mut name = String::with_capacity(73);
                for byte in ipv6.octets().iter().rev() {
                    name.push_str(&format!("{:x}.{:x}.", byte & 0x0f, byte >> 4));
                }
                name.push_str("ip6.arpa.");
                name
            }
        }
    }

    /// Recursive PTR query for `ip`. Returns the message id and wire bytes.
    pub fn build_ptr_query(ip: &IpAddr) -> Result<(u16, Vec<u8>), DomainError> {
        let reverse = Self::reverse_name(ip);
        let name = Name::from_str(&reverse).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid reverse name '{}': {}", reverse, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::PTR);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        Ok((id, Self::serialize_message(&message)?))
    }

    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(128);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;
        Ok(buf)
    }
}
