#![allow(dead_code)]

pub mod mock_ports;

pub use mock_ports::*;

use std::sync::Arc;
use tapguard_domain::{
    DnsAnswer, DnsMessage, DnsQuestion, DnstapMessage, RecordType, ResponseCode, TapMessageType,
    TransactionRecord,
};

pub fn response(qname: &str, answers: Vec<DnsAnswer>) -> DnsMessage {
    DnsMessage {
        id: 4242,
        response_code: ResponseCode::NO_ERROR,
        questions: vec![DnsQuestion {
            name: qname.to_string(),
            record_type: RecordType::A,
        }],
        answers,
    }
}

pub fn cname_response(qname: &str, links: &[(&str, &str)]) -> DnsMessage {
    let answers = links
        .iter()
        .map(|(name, target)| DnsAnswer::cname(*name, *target))
        .collect();
    response(qname, answers)
}

pub fn record(dns: Option<DnsMessage>) -> Arc<TransactionRecord> {
    let tap = DnstapMessage {
        message_type: Some(TapMessageType::ClientResponse),
        response_time_sec: Some(1_700_000_000),
        response_time_nsec: Some(0),
        ..Default::default()
    };
    Arc::new(TransactionRecord::new(tap, dns, String::new()))
}
