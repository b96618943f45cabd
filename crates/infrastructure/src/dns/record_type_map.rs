//! Mapping between `tapguard_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides carry the numeric RR type, so the conversion goes through it
//! and unknown types survive.

use hickory_proto::rr::RecordType as HickoryRecordType;
use tapguard_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
