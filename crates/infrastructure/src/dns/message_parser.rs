use super::RecordTypeMapper;
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RData};
use tapguard_application::ports::DnsMessageParser;
use tapguard_domain::{normalize_domain, DnsAnswer, DnsMessage, DnsQuestion, ResponseCode};
use tracing::debug;

/// Unpacks wire-format DNS messages with `hickory-proto`.
///
/// Names come out lower-cased and fully qualified so they compare directly
/// against block-list entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryMessageParser;

impl HickoryMessageParser {
    pub fn new() -> Self {
        Self
    }
}

fn fqdn(name: &Name) -> String {
    normalize_domain(&name.to_utf8()).into_string()
}

impl DnsMessageParser for HickoryMessageParser {
    fn parse(&self, wire: &[u8]) -> Option<DnsMessage> {
        let message = match Message::from_vec(wire) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = wire.len(), "Malformed DNS message in tap frame");
                return None;
            }
        };

        let questions = message
            .queries()
            .iter()
            .map(|query| DnsQuestion {
                name: fqdn(query.name()),
                record_type: RecordTypeMapper::from_hickory(query.query_type()),
            })
            .collect();

        let answers = message
            .answers()
            .iter()
            .map(|record| {
                let name = fqdn(record.name());
                match record.data() {
                    RData::CNAME(canonical) => DnsAnswer::cname(name, fqdn(&canonical.0)),
                    _ => DnsAnswer::other(name, RecordTypeMapper::from_hickory(record.record_type())),
                }
            })
            .collect();

        Some(DnsMessage {
            id: message.id(),
            response_code: ResponseCode(u16::from(message.response_code())),
            questions,
            answers,
        })
    }
}
