use tapguard_domain::DnsMessage;

pub trait DnsMessageParser: Send + Sync {
    /// `None` when the bytes are not a well-formed DNS message.
    fn parse(&self, wire: &[u8]) -> Option<DnsMessage>;
}
