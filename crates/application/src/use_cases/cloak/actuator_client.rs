use crate::ports::ResolverControl;
use std::sync::Arc;
use tapguard_domain::ActuatorCommand;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorStats {
    pub sent: u64,
    pub failed: u64,
}

/// Fire-and-forget front for [`ResolverControl`].
///
/// Commands queue on a bounded channel and a single worker issues them one
/// by one. Failures are logged and dropped.
pub struct ActuatorClient {
    sender: mpsc::Sender<ActuatorCommand>,
    worker: JoinHandle<ActuatorStats>,
}

impl ActuatorClient {
    pub fn spawn(control: Arc<dyn ResolverControl>, buffer: usize) -> Self {
        let (sender, mut rx) = mpsc::channel::<ActuatorCommand>(buffer.max(1));

        let worker = tokio::spawn(async move {
            let mut stats = ActuatorStats::default();
            while let Some(command) = rx.recv().await {
                match control.execute(&command).await {
                    Ok(()) => {
                        stats.sent += 1;
                        debug!(command = %command, "Actuator command applied");
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!(command = %command, error = %e, "Actuator command failed");
                    }
                }
            }
            stats
        });

        Self { sender, worker }
    }

    pub async fn send(&self, command: ActuatorCommand) {
        if let Err(e) = self.sender.send(command).await {
            error!(command = %e.0, "Actuator worker is gone; command dropped");
        }
    }

    /// Close the queue and wait for every queued command to be issued.
    pub async fn shutdown(self) -> ActuatorStats {
        drop(self.sender);
        match self.worker.await {
            Ok(stats) => stats,
            Err(e) => {
                error!(error = %e, "Actuator worker panicked");
                ActuatorStats::default()
            }
        }
    }
}
