use super::wire::{FieldReader, WireError, WireValue};
use super::{envelope_field, message_field, DNSTAP_TYPE_MESSAGE};
use bytes::Bytes;
use tapguard_application::ports::DnstapDecoder;
use tapguard_domain::{
    DnstapMessage, DomainError, SocketFamily, SocketProtocol, TapMessageType,
};
use tracing::trace;

/// Decodes `protobuf:dnstap.Dnstap` frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct DnstapCodec;

impl DnstapCodec {
    pub fn new() -> Self {
        Self
    }

    fn decode_message(buf: Bytes) -> Result<DnstapMessage, WireError> {
        let mut msg = DnstapMessage::default();

        for field in FieldReader::new(buf) {
            let (number, value) = field?;
            match number {
                message_field::TYPE => {
                    msg.message_type = value.as_enum().map(TapMessageType::from_i32)
                }
                message_field::SOCKET_FAMILY => {
                    msg.socket_family = value.as_enum().map(SocketFamily::from_i32)
                }
                message_field::SOCKET_PROTOCOL => {
                    msg.socket_protocol = value.as_enum().map(SocketProtocol::from_i32)
                }
                message_field::QUERY_ADDRESS => msg.query_address = value.into_bytes(),
                message_field::RESPONSE_ADDRESS => msg.response_address = value.into_bytes(),
                message_field::QUERY_PORT => msg.query_port = value.as_u32(),
                message_field::RESPONSE_PORT => msg.response_port = value.as_u32(),
                message_field::QUERY_TIME_SEC => msg.query_time_sec = value.as_u64(),
                message_field::QUERY_TIME_NSEC => msg.query_time_nsec = value.as_u32(),
                message_field::QUERY_MESSAGE => msg.query_message = value.into_bytes(),
                message_field::QUERY_ZONE => msg.query_zone = value.into_bytes(),
                message_field::RESPONSE_TIME_SEC => msg.response_time_sec = value.as_u64(),
                message_field::RESPONSE_TIME_NSEC => msg.response_time_nsec = value.as_u32(),
                message_field::RESPONSE_MESSAGE => msg.response_message = value.into_bytes(),
                other => trace!(field = other, "Skipping unknown dnstap Message field"),
            }
        }

        Ok(msg)
    }
}

fn framing(reason: impl std::fmt::Display) -> DomainError {
    DomainError::Framing(format!("invalid dnstap envelope: {}", reason))
}

impl DnstapDecoder for DnstapCodec {
    fn decode(&self, frame: &Bytes) -> Result<Option<DnstapMessage>, DomainError> {
        let mut envelope_type = None;
        let mut message = None;

        for field in FieldReader::new(frame.clone()) {
            let (number, value) = field.map_err(framing)?;
            match (number, value) {
                (envelope_field::TYPE, WireValue::Varint(t)) => envelope_type = Some(t),
                (envelope_field::MESSAGE, WireValue::Bytes(b)) => message = Some(b),
                (envelope_field::TYPE | envelope_field::MESSAGE, _) => {
                    return Err(framing(format!("field {} has the wrong wire type", number)))
                }
                _ => {}
            }
        }

        let Some(envelope_type) = envelope_type else {
            return Err(framing("missing type"));
        };
        if envelope_type != DNSTAP_TYPE_MESSAGE {
            trace!(envelope_type, "Skipping non-MESSAGE dnstap frame");
            return Ok(None);
        }
        let Some(message) = message else {
            return Err(framing("MESSAGE envelope without message"));
        };

        Self::decode_message(message).map(Some).map_err(framing)
    }
}
