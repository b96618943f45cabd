use super::codec::{expect_control, read_frame, write_control, ControlFrame, ControlType, Frame};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tapguard_domain::DomainError;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Bidirectional Frame Streams over a unix-domain socket.
///
/// Every accepted connection runs the READY/ACCEPT/START handshake and then
/// feeds the shared frame channel.
pub struct SocketFrameSource {
    path: PathBuf,
    listener: UnixListener,
}

impl SocketFrameSource {
    /// Bind `path`, replacing a stale socket file.
    pub fn bind(path: &str) -> Result<Self, DomainError> {
        let socket_path = Path::new(path);
        if socket_path.exists() {
            std::fs::remove_file(socket_path).map_err(|e| {
                DomainError::IoError(format!("Failed to remove stale socket {}: {}", path, e))
            })?;
        }
        let listener = UnixListener::bind(socket_path)
            .map_err(|e| DomainError::IoError(format!("Failed to bind {}: {}", path, e)))?;

        Ok(Self {
            path: socket_path.to_path_buf(),
            listener,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn run(
        self,
        frames: mpsc::Sender<Bytes>,
        cancel: CancellationToken,
    ) -> Result<u64, DomainError> {
        info!(path = %self.path.display(), "Listening for dnstap connections");

        let mut connections = JoinSet::new();
        let mut total = 0u64;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        debug!("dnstap connection accepted");
                        let frames = frames.clone();
                        let cancel = cancel.clone();
                        connections.spawn(async move {
                            serve_bidirectional(stream, &frames, &cancel).await
                        });
                    }
                    Err(e) => error!(error = %e, "Failed to accept dnstap connection"),
                },
                Some(done) = connections.join_next(), if !connections.is_empty() => {
                    total += connection_result(done);
                }
            }
        }

        while let Some(done) = connections.join_next().await {
            total += connection_result(done);
        }
        drop(frames);

        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "Socket file already gone");
        }
        info!(frames = total, "dnstap socket closed");
        Ok(total)
    }
}

fn connection_result(done: Result<Result<u64, DomainError>, tokio::task::JoinError>) -> u64 {
    match done {
        Ok(Ok(count)) => {
            debug!(frames = count, "dnstap connection finished");
            count
        }
        Ok(Err(e)) => {
            warn!(error = %e, "dnstap connection dropped");
            0
        }
        Err(e) => {
            error!(error = %e, "dnstap connection task failed");
            0
        }
    }
}

/// Server side of one bidirectional session.
pub async fn serve_bidirectional<S>(
    stream: S,
    frames: &mpsc::Sender<Bytes>,
    cancel: &CancellationToken,
) -> Result<u64, DomainError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);

    expect_control(&mut reader, ControlType::Ready).await?;
    write_control(&mut write_half, &ControlFrame::dnstap(ControlType::Accept)).await?;
    expect_control(&mut reader, ControlType::Start).await?;

    let mut count = 0u64;
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => break,
            frame = read_frame(&mut reader) => frame?,
        };

        match frame {
            Some(Frame::Data(payload)) => {
                if frames.send(payload).await.is_err() {
                    break;
                }
                count += 1;
            }
            Some(Frame::Control(control)) if control.kind == ControlType::Stop => {
                write_control(&mut write_half, &ControlFrame::new(ControlType::Finish)).await?;
                break;
            }
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
