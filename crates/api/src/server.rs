use crate::{create_reload_routes, AppState};
use async_trait::async_trait;
use std::net::SocketAddr;
use tapguard_application::ports::TriggerListener;
use tapguard_domain::DomainError;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// HTTP reload listener running on its own task until stopped.
pub struct ReloadServer {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ReloadServer {
    pub async fn start(bind_addr: SocketAddr, state: AppState) -> Result<Self, DomainError> {
        let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind reload listener {}: {}", bind_addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        info!(bind_address = %local_addr, "Starting reload listener");

        let app = create_reload_routes(state);
        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
            {
                error!(error = %e, "Reload listener error");
            }
        });

        Ok(Self {
            local_addr,
            cancel,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait]
impl TriggerListener for ReloadServer {
    async fn stop(self: Box<Self>) {
        let this = *self;
        this.cancel.cancel();
        if let Err(e) = this.task.await {
            error!(error = %e, "Reload listener task failed");
        }
        info!("Reload listener stopped");
    }
}
