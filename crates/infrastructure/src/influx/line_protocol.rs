use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::BinDecodable;
use std::fmt::Write;
use tapguard_domain::{format_address, Direction, TransactionRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

/// One InfluxDB point, rendered with [`Point::to_line`].
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: Vec<(&'static str, String)>,
    pub fields: Vec<(&'static str, FieldValue)>,
    pub timestamp_ms: i64,
}

impl Point {
    pub fn new(measurement: &str, timestamp_ms: i64) -> Self {
        Self {
            measurement: measurement.to_string(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp_ms,
        }
    }

    pub fn tag(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.tags.push((key, value.into()));
        self
    }

    pub fn field(&mut self, key: &'static str, value: FieldValue) -> &mut Self {
        self.fields.push((key, value));
        self
    }

    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field_value(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Line protocol with tags sorted by key. Empty tag values are left out.
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(256);
        escape_into(&mut line, &self.measurement, &[',', ' ']);

        let mut tags: Vec<_> = self.tags.iter().filter(|(_, v)| !v.is_empty()).collect();
        tags.sort_by_key(|(k, _)| *k);
        for (key, value) in tags {
            line.push(',');
            escape_into(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            escape_into(&mut line, value, &[',', '=', ' ']);
        }

        for (idx, (key, value)) in self.fields.iter().enumerate() {
            line.push(if idx == 0 { ' ' } else { ',' });
            escape_into(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            match value {
                FieldValue::Int(v) => {
                    let _ = write!(line, "{}i", v);
                }
                FieldValue::Bool(v) => line.push_str(if *v { "true" } else { "false" }),
                FieldValue::Str(v) => {
                    line.push('"');
                    escape_into(&mut line, v, &['"', '\\']);
                    line.push('"');
                }
            }
        }

        let _ = write!(line, " {}", self.timestamp_ms);
        line
    }
}

fn escape_into(out: &mut String, value: &str, special: &[char]) {
    for c in value.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Build the point for one record. `None` when the record yields no fields,
/// which InfluxDB would reject.
pub fn point_from_record(measurement: &str, record: &TransactionRecord) -> Option<Point> {
    let tap = &record.tap;
    let mut point = Point::new(measurement, record.timestamp.timestamp_millis());

    let tap_type = tap.message_type.map(|t| t.as_str()).unwrap_or("UNKNOWN");
    point.tag("tap_type", tap_type);

    if let Some(address) = tap.query_address.as_deref() {
        point.tag("qaddress", format_address(address));
    }
    if !record.client_host.is_empty() {
        point.tag("qhost", record.client_host.as_str());
    }

    if record.direction == Some(Direction::Response) {
        if let Some(address) = tap.response_address.as_deref() {
            point.tag("raddress", format_address(address));
        }
        if record.dns.as_ref().is_some_and(|m| m.is_nodata()) {
            point.field("nodata", FieldValue::Bool(true));
        }
    }

    if let Some(dns) = &record.dns {
        point.field("id", FieldValue::Int(i64::from(dns.id)));
        point.tag("status", dns.response_code.mnemonic());
        if let Some(question) = dns.first_question() {
            point.tag("qname", question.name.as_str());
            point.tag("qtype", question.record_type.to_string());
        }
    }

    if let Some(protocol) = tap.socket_protocol {
        point.tag("protocol", protocol.as_str());
    }

    if let Some(zone) = tap.query_zone.as_deref() {
        if let Ok(name) = Name::from_bytes(zone) {
            point.tag("query_zone", format!("{:?}", name.to_utf8()));
        }
    }

    if let Some(family) = tap.socket_family {
        point.field("family", FieldValue::Str(family.as_str().to_string()));
    }

    if let Some(port) = tap.query_port {
        point.field("qport", FieldValue::Int(i64::from(port)));
    }

    if point.fields.is_empty() {
        return None;
    }
    Some(point)
}
