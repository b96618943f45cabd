use super::Command;
use crate::ports::BlockListSource;
use std::fmt;
use std::sync::Arc;
use tapguard_domain::DomainError;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, instrument, warn};

/// Which endpoint asked for the reload. Every kind recomputes all three lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadKind {
    All,
    Block,
    White,
    Black,
}

impl ReloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadKind::All => "all",
            ReloadKind::Block => "block",
            ReloadKind::White => "white",
            ReloadKind::Black => "black",
        }
    }
}

impl fmt::Display for ReloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rebuild the block set from the list files and enqueue it for the engine.
///
/// Concurrent calls run one at a time. The engine itself is never touched
/// here; the new set travels through the command channel.
pub struct ReloadBlockListsUseCase {
    source: Arc<dyn BlockListSource>,
    commands: Mutex<Option<mpsc::Sender<Command>>>,
}

impl ReloadBlockListsUseCase {
    pub fn new(source: Arc<dyn BlockListSource>, commands: mpsc::Sender<Command>) -> Self {
        Self {
            source,
            commands: Mutex::new(Some(commands)),
        }
    }

    /// Returns the size of the enqueued set. On a load failure nothing is
    /// enqueued and the engine keeps its current set.
    #[instrument(skip(self))]
    pub async fn execute(&self, kind: ReloadKind) -> Result<usize, DomainError> {
        let guard = self.commands.lock().await;
        let Some(commands) = guard.as_ref() else {
            return Err(DomainError::EngineStopped);
        };

        info!(kind = %kind, "Block list update requested");

        let blocked = self.source.load().await.map_err(|e| {
            warn!(kind = %kind, error = %e, "Block list update failed");
            e
        })?;
        let count = blocked.len();

        commands
            .send(Command::ReloadBlockSet(blocked))
            .await
            .map_err(|_| DomainError::EngineStopped)?;

        info!(kind = %kind, blocked_domains = count, "Block list update enqueued");
        Ok(count)
    }

    /// Release the command sender. Waits for an in-flight reload; later
    /// calls to `execute` fail with [`DomainError::EngineStopped`].
    pub async fn close(&self) {
        self.commands.lock().await.take();
    }
}
