//! Frame Streams (fstrm) input carrying dnstap payloads.
//!
//! Data frames are a big-endian `u32` length and the payload. A zero length
//! escapes a control frame: `u32` control length, `u32` control type, then
//! `(u32 field type, u32 length, bytes)` fields.

mod codec;
mod file_source;
mod socket_source;

pub use codec::{
    read_frame, write_control, ControlFrame, ControlType, Frame, CONTENT_TYPE, MAX_CONTROL_SIZE,
    MAX_FRAME_SIZE,
};
pub use file_source::{read_unidirectional, FileFrameSource};
pub use socket_source::{serve_bidirectional, SocketFrameSource};

use bytes::Bytes;
use tapguard_domain::config::{InputConfig, InputKind};
use tapguard_domain::DomainError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Configured input, opened but not yet reading.
pub enum FrameSource {
    File(FileFrameSource),
    Socket(SocketFrameSource),
}

impl FrameSource {
    /// Open the file or bind the socket. Failure here is a startup error.
    pub async fn open(config: &InputConfig) -> Result<Self, DomainError> {
        match config.kind {
            InputKind::File => Ok(FrameSource::File(FileFrameSource::open(&config.path).await?)),
            InputKind::Socket => Ok(FrameSource::Socket(SocketFrameSource::bind(&config.path)?)),
        }
    }

    /// Start forwarding data frames into `frames`. The sender is dropped when
    /// the input ends or `cancel` fires, which closes the channel.
    pub fn spawn(
        self,
        frames: mpsc::Sender<Bytes>,
        cancel: CancellationToken,
    ) -> JoinHandle<Result<u64, DomainError>> {
        match self {
            FrameSource::File(source) => tokio::spawn(source.run(frames, cancel)),
            FrameSource::Socket(source) => tokio::spawn(source.run(frames, cancel)),
        }
    }
}
