use super::{ActuatorClient, CloakEngine, Command, EngineReport, EngineState, ReloadBlockListsUseCase};
use crate::ports::{BlockListSource, RecordConsumer, ResolverControl, TriggerListener};
use async_trait::async_trait;
use std::sync::Arc;
use tapguard_domain::{DomainError, TransactionRecord};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const CLOAK_CONSUMER_NAME: &str = "cloak-defense";

/// Consumer side of the cloak-defense engine.
///
/// Forwards each record onto the engine's command channel, the same channel
/// the reload use case feeds.
pub struct CloakDefenseConsumer {
    traffic: Option<mpsc::Sender<Command>>,
    reload: Arc<ReloadBlockListsUseCase>,
    listener: Option<Box<dyn TriggerListener>>,
    engine: JoinHandle<EngineReport>,
    state: watch::Receiver<EngineState>,
}

impl CloakDefenseConsumer {
    /// Load the initial block set and start the engine and actuator tasks.
    ///
    /// A load failure here is returned to the caller; there is no policy to
    /// run without.
    pub async fn start(
        source: Arc<dyn BlockListSource>,
        control: Arc<dyn ResolverControl>,
        buffer_size: usize,
    ) -> Result<Self, DomainError> {
        let initial = source.load().await?;
        info!(blocked_domains = initial.len(), "Initial block set loaded");

        let buffer_size = buffer_size.max(1);
        let actuator = ActuatorClient::spawn(control, buffer_size);
        let engine = CloakEngine::new(initial, actuator);
        let state = engine.subscribe();

        let (traffic, commands) = mpsc::channel(buffer_size);
        let reload = Arc::new(ReloadBlockListsUseCase::new(source, traffic.clone()));
        let engine = tokio::spawn(engine.run(commands));

        Ok(Self {
            traffic: Some(traffic),
            reload,
            listener: None,
            engine,
            state,
        })
    }

    pub fn reload_use_case(&self) -> Arc<ReloadBlockListsUseCase> {
        Arc::clone(&self.reload)
    }

    /// Attach the trigger listener so it is stopped during teardown.
    pub fn with_listener(mut self, listener: Box<dyn TriggerListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn state(&self) -> watch::Receiver<EngineState> {
        self.state.clone()
    }
}

#[async_trait]
impl RecordConsumer for CloakDefenseConsumer {
    fn name(&self) -> &str {
        CLOAK_CONSUMER_NAME
    }

    async fn consume(&mut self, record: Arc<TransactionRecord>) {
        let Some(traffic) = self.traffic.as_ref() else {
            return;
        };
        if traffic.send(Command::Traffic(record)).await.is_err() {
            warn!("Cloak engine stopped; dropping record");
            self.traffic = None;
        }
    }

    /// Close the command channel, wait for the engine and actuator to drain,
    /// then stop the listener.
    async fn finish(self: Box<Self>) {
        let mut this = *self;

        this.reload.close().await;
        this.traffic.take();

        match this.engine.await {
            Ok(report) => info!(
                records = report.records,
                cloaks_detected = report.cloaks_detected,
                unblocks = report.unblocks,
                reloads = report.reloads,
                blocked_domains = report.blocked_domains,
                cloaked_domains = report.cloaked_domains,
                actuator_sent = report.actuator.sent,
                actuator_failed = report.actuator.failed,
                "Cloak engine stopped"
            ),
            Err(e) => error!(error = %e, "Cloak engine task failed"),
        }

        if let Some(listener) = this.listener.take() {
            listener.stop().await;
        }
    }
}
