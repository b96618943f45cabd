#![allow(dead_code, unused_imports)]

pub mod dns_server_mock;
pub mod proto;

pub use dns_server_mock::MockDnsServer;
pub use proto::*;

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;
use tapguard_infrastructure::dns::MessageBuilder;

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

/// Wire-format response for `qname`/A with the given CNAME links and a final
/// A record for the last target.
pub fn cname_response_wire(id: u16, qname: &str, links: &[(&str, &str)]) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Response, OpCode::Query);
    message.add_query(Query::query(name(qname), RecordType::A));
    message.set_response_code(ResponseCode::NoError);
    for (owner, target) in links {
        message.add_answer(Record::from_rdata(
            name(owner),
            300,
            RData::CNAME(CNAME(name(target))),
        ));
    }
    if let Some((_, last)) = links.last() {
        message.add_answer(Record::from_rdata(
            name(last),
            300,
            RData::A(A(Ipv4Addr::new(192, 0, 2, 1))),
        ));
    }
    MessageBuilder::serialize_message(&message).unwrap()
}

pub fn query_wire(id: u16, qname: &str, qtype: RecordType) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.add_query(Query::query(name(qname), qtype));
    MessageBuilder::serialize_message(&message).unwrap()
}

pub fn nodata_response_wire(id: u16, qname: &str) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Response, OpCode::Query);
    message.add_query(Query::query(name(qname), RecordType::AAAA));
    message.set_response_code(ResponseCode::NoError);
    MessageBuilder::serialize_message(&message).unwrap()
}
