//! dnstap protobuf decoding.
//!
//! The schema is small and stable, so fields are read straight off the
//! protobuf wire format instead of through generated code.

mod codec;
pub mod wire;

pub use codec::DnstapCodec;

/// `Dnstap.Type.MESSAGE`
pub const DNSTAP_TYPE_MESSAGE: u64 = 1;

/// Field numbers of `Dnstap` that the codec reads. `identity` (1) and
/// `version` (2) are skipped with the other unknown fields.
pub mod envelope_field {
    pub const MESSAGE: u32 = 14;
    pub const TYPE: u32 = 15;
}

/// Field numbers of `Message`.
pub mod message_field {
    pub const TYPE: u32 = 1;
    pub const SOCKET_FAMILY: u32 = 2;
    pub const SOCKET_PROTOCOL: u32 = 3;
    pub const QUERY_ADDRESS: u32 = 4;
    pub const RESPONSE_ADDRESS: u32 = 5;
    pub const QUERY_PORT: u32 = 6;
    pub const RESPONSE_PORT: u32 = 7;
    pub const QUERY_TIME_SEC: u32 = 8;
    pub const QUERY_TIME_NSEC: u32 = 9;
    pub const QUERY_MESSAGE: u32 = 10;
    pub const QUERY_ZONE: u32 = 11;
    pub const RESPONSE_TIME_SEC: u32 = 12;
    pub const RESPONSE_TIME_NSEC: u32 = 13;
    pub const RESPONSE_MESSAGE: u32 = 14;
}
