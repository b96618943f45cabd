use bytes::Bytes;
use tapguard_domain::{DnstapMessage, DomainError};

pub trait DnstapDecoder: Send + Sync {
    /// Decode one frame's outer envelope.
    ///
    /// `Ok(None)` for envelopes of a type other than MESSAGE. `Err` means the
    /// envelope itself could not be identified and the stream is out of sync.
    fn decode(&self, frame: &Bytes) -> Result<Option<DnstapMessage>, DomainError>;
}
