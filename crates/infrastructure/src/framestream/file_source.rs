use super::codec::{expect_control, read_frame, ControlType, Frame};
use bytes::Bytes;
use std::path::PathBuf;
use tapguard_domain::DomainError;
use tokio::fs::File;
use tokio::io::{AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Unidirectional Frame Streams file, e.g. one written by `unbound` or
/// `dnstap -w`.
pub struct FileFrameSource {
    path: PathBuf,
    file: File,
}

impl FileFrameSource {
    pub async fn open(path: &str) -> Result<Self, DomainError> {
        let file = File::open(path)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to open {}: {}", path, e)))?;
        Ok(Self {
            path: PathBuf::from(path),
            file,
        })
    }

    pub async fn run(
        self,
        frames: mpsc::Sender<Bytes>,
        cancel: CancellationToken,
    ) -> Result<u64, DomainError> {
        let path = self.path.display().to_string();
        info!(path = %path, "Reading dnstap file");

        let mut reader = BufReader::new(self.file);
        let result = read_unidirectional(&mut reader, &frames, &cancel).await;
        match &result {
            Ok(count) => info!(path = %path, frames = count, "dnstap file finished"),
            Err(e) => warn!(path = %path, error = %e, "dnstap file aborted"),
        }
        result
    }
}

/// START, data frames, then STOP or end of stream.
pub async fn read_unidirectional<R>(
    reader: &mut R,
    frames: &mpsc::Sender<Bytes>,
    cancel: &CancellationToken,
) -> Result<u64, DomainError>
where
    R: AsyncRead + Unpin,
{
    expect_control(reader, ControlType::Start).await?;

    let mut count = 0u64;
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Frame reader cancelled");
                break;
            }
            frame = read_frame(reader) => frame?,
        };

        match frame {
            Some(Frame::Data(payload)) => {
                if frames.send(payload).await.is_err() {
                    debug!("Frame channel closed; stopping reader");
                    break;
                }
                count += 1;
            }
            Some(Frame::Control(control)) if control.kind == ControlType::Stop => break,
            Some(Frame::Control(control)) => {
                return Err(DomainError::Framing(format!(
                    "unexpected {:?} control frame in data stream",
                    control.kind
                )))
            }
            None => break,
        }
    }
    Ok(count)
}
