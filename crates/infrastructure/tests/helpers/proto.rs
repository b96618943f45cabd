//! Protobuf encoding of dnstap test frames.

use bytes::Bytes;

#[derive(Default)]
pub struct ProtoWriter {
    buf: Vec<u8>,
}

impl ProtoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    fn key(&mut self, field: u32, wire_type: u8) {
        self.varint((u64::from(field) << 3) | u64::from(wire_type));
    }

    pub fn varint_field(mut self, field: u32, value: u64) -> Self {
        self.key(field, 0);
        self.varint(value);
        self
    }

    pub fn bytes_field(mut self, field: u32, value: &[u8]) -> Self {
        self.key(field, 2);
        self.varint(value.len() as u64);
        self.buf.extend_from_slice(value);
        self
    }

    pub fn fixed32_field(mut self, field: u32, value: u32) -> Self {
        self.key(field, 5);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// `Dnstap { type: MESSAGE, message }`
pub fn dnstap_frame(message: &[u8]) -> Bytes {
    Bytes::from(
        ProtoWriter::new()
            .bytes_field(1, b"resolver1")
            .bytes_field(2, b"unbound 1.19")
            .bytes_field(14, message)
            .varint_field(15, 1)
            .finish(),
    )
}

/// A CLIENT_RESPONSE message over UDP/IPv4 from 192.168.1.20:53000.
pub fn client_response(dns_wire: &[u8]) -> Vec<u8> {
    ProtoWriter::new()
        .varint_field(1, 6)
        .varint_field(2, 1)
        .varint_field(3, 1)
        .bytes_field(4, &[192, 168, 1, 20])
        .bytes_field(5, &[127, 0, 0, 1])
        .varint_field(6, 53000)
        .varint_field(7, 53)
        .varint_field(8, 1_700_000_000)
        .fixed32_field(9, 111)
        .varint_field(12, 1_700_000_001)
        .fixed32_field(13, 222_000_000)
        .bytes_field(14, dns_wire)
        .finish()
}

/// A CLIENT_QUERY message over TCP/IPv6.
pub fn client_query(dns_wire: &[u8]) -> Vec<u8> {
    let mut v6 = [0u8; 16];
    v6[0] = 0x20;
    v6[1] = 0x01;
    v6[2] = 0x0d;
    v6[3] = 0xb8;
    v6[15] = 0x05;
    ProtoWriter::new()
        .varint_field(1, 5)
        .varint_field(2, 2)
        .varint_field(3, 2)
        .bytes_field(4, &v6)
        .varint_field(6, 40000)
        .varint_field(8, 1_700_000_000)
        .fixed32_field(9, 5)
        .bytes_field(10, dns_wire)
        .finish()
}
