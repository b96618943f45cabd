mod helpers;

use bytes::Bytes;
use helpers::*;
use tapguard_application::ports::DnstapDecoder;
use tapguard_domain::{
    Direction, DomainError, SocketFamily, SocketProtocol, TapMessageType,
};
use tapguard_infrastructure::dnstap::DnstapCodec;

#[test]
fn test_decodes_client_response() {
    let wire = cname_response_wire(7, "www.example.com.", &[]);
    let frame = dnstap_frame(&client_response(&wire));

    let message = DnstapCodec::new().decode(&frame).unwrap().unwrap();

    assert_eq!(message.message_type, Some(TapMessageType::ClientResponse));
    assert_eq!(message.socket_family, Some(SocketFamily::Inet));
    assert_eq!(message.socket_protocol, Some(SocketProtocol::Udp));
    assert_eq!(message.query_address.as_deref(), Some(&[192, 168, 1, 20][..]));
    assert_eq!(message.response_address.as_deref(), Some(&[127, 0, 0, 1][..]));
    assert_eq!(message.query_port, Some(53000));
    assert_eq!(message.response_port, Some(53));
    assert_eq!(message.response_time_sec, Some(1_700_000_001));
    assert_eq!(message.response_time_nsec, Some(222_000_000));
    assert_eq!(message.response_message.as_deref(), Some(wire.as_slice()));
    assert_eq!(message.direction(), Some(Direction::Response));

    let ts = message.timestamp();
    assert_eq!(ts.timestamp(), 1_700_000_001);
    assert_eq!(ts.timestamp_subsec_millis(), 222);
}

#[test]
fn test_decodes_ipv6_tcp_query() {
    let wire = query_wire(9, "example.org.", hickory_proto::rr::RecordType::AAAA);
    let frame = dnstap_frame(&client_query(&wire));

    let message = DnstapCodec::new().decode(&frame).unwrap().unwrap();

    assert_eq!(message.message_type, Some(TapMessageType::ClientQuery));
    assert_eq!(message.socket_family, Some(SocketFamily::Inet6));
    assert_eq!(message.socket_protocol, Some(SocketProtocol::Tcp));
    assert_eq!(message.query_address.as_ref().map(|a| a.len()), Some(16));
    assert!(message.response_address.is_none());
    assert_eq!(message.dns_payload().map(|b| b.as_ref()), Some(wire.as_slice()));
}

#[test]
fn test_unknown_fields_are_skipped() {
    let message = ProtoWriter::new()
        .varint_field(1, 6)
        .bytes_field(99, b"future extension")
        .varint_field(100, 42)
        .finish();
    let frame = dnstap_frame(&message);

    let decoded = DnstapCodec::new().decode(&frame).unwrap().unwrap();
    assert_eq!(decoded.message_type, Some(TapMessageType::ClientResponse));
}

#[test]
fn test_envelope_identity_and_version_are_skipped() {
    let message = ProtoWriter::new().varint_field(1, 5).finish();
    let frame = Bytes::from(
        ProtoWriter::new()
            .varint_field(15, 1)
            .bytes_field(14, &message)
            .bytes_field(2, b"unbound 1.19")
            .bytes_field(1, b"resolver1")
            .finish(),
    );

    let decoded = DnstapCodec::new().decode(&frame).unwrap().unwrap();
    assert_eq!(decoded.message_type, Some(TapMessageType::ClientQuery));
}

#[test]
fn test_unknown_message_type_is_kept() {
    let message = ProtoWriter::new().varint_field(1, 77).finish();
    let decoded = DnstapCodec::new()
        .decode(&dnstap_frame(&message))
        .unwrap()
        .unwrap();
    assert_eq!(decoded.message_type, Some(TapMessageType::Unknown(77)));
    assert!(decoded.direction().is_none());
}

#[test]
fn test_non_message_envelope_is_skipped() {
    let frame = Bytes::from(ProtoWriter::new().varint_field(15, 2).finish());
    assert!(DnstapCodec::new().decode(&frame).unwrap().is_none());
}

#[test]
fn test_missing_type_is_framing_error() {
    let frame = Bytes::from(ProtoWriter::new().bytes_field(14, b"").finish());
    let result = DnstapCodec::new().decode(&frame);
    assert!(matches!(result, Err(DomainError::Framing(_))));
}

#[test]
fn test_message_envelope_without_message_is_framing_error() {
    let frame = Bytes::from(ProtoWriter::new().varint_field(15, 1).finish());
    let result = DnstapCodec::new().decode(&frame);
    assert!(matches!(result, Err(DomainError::Framing(_))));
}

#[test]
fn test_truncated_frame_is_framing_error() {
    let mut bytes = dnstap_frame(&client_response(b"\x00\x01\x02")).to_vec();
    bytes.truncate(bytes.len() - 5);
    let result = DnstapCodec::new().decode(&Bytes::from(bytes));
    assert!(matches!(result, Err(DomainError::Framing(_))));
}

#[test]
fn test_garbage_is_framing_error() {
    let frame = Bytes::from_static(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    assert!(DnstapCodec::new().decode(&frame).is_err());
}
