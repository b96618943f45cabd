use super::{ActuatorClient, ActuatorStats, Command};
use tapguard_domain::{
    ActuatorCommand, BlockSet, ChainOutcome, CloakMap, CnameChain, TransactionRecord,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Command channel closed; queued actuator commands are being flushed.
    Draining,
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineReport {
    pub records: u64,
    pub cloaks_detected: u64,
    pub unblocks: u64,
    pub reloads: u64,
    pub blocked_domains: usize,
    pub cloaked_domains: usize,
    pub actuator: ActuatorStats,
}

/// Single owner of the live [`BlockSet`] and [`CloakMap`].
///
/// Nothing else reads or writes them; all changes arrive as [`Command`]s and
/// are applied one at a time by [`CloakEngine::run`].
pub struct CloakEngine {
    blocked: BlockSet,
    cloaked: CloakMap,
    actuator: ActuatorClient,
    state: watch::Sender<EngineState>,
    report: EngineReport,
}

impl CloakEngine {
    pub fn new(initial: BlockSet, actuator: ActuatorClient) -> Self {
        let (state, _) = watch::channel(EngineState::Running);
        Self {
            blocked: initial,
            cloaked: CloakMap::new(),
            actuator,
            state,
            report: EngineReport::default(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<EngineState> {
        self.state.subscribe()
    }

    pub fn blocked(&self) -> &BlockSet {
        &self.blocked
    }

    pub fn cloaked(&self) -> &CloakMap {
        &self.cloaked
    }

    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::Traffic(record) => self.process_record(&record).await,
            Command::ReloadBlockSet(blocked) => self.apply_reload(blocked).await,
        }
    }

    /// Block the query name when its CNAME chain reaches a blocked name.
    pub async fn process_record(&mut self, record: &TransactionRecord) {
        self.report.records += 1;

        let Some(dns) = record.dns.as_ref() else {
            return;
        };
        if dns.answers.is_empty() {
            return;
        }
        let Some(question) = dns.first_question() else {
            return;
        };
        let qname = question.name.as_str();
        if self.blocked.contains(qname) {
            return;
        }
        let Some(chain) = CnameChain::from_answers(&dns.answers) else {
            return;
        };

        match chain.walk(qname, &self.blocked) {
            ChainOutcome::Blocked(target) => {
                info!(domain = %qname, cname = %target, "Blocking \"{}\" because of blocked cname \"{}\"", qname, target);
                self.cloaked.insert(qname, target);
                self.blocked.insert(qname);
                self.report.cloaks_detected += 1;
                self.actuator
                    .send(ActuatorCommand::Block(qname.to_string()))
                    .await;
            }
            ChainOutcome::Ends => {}
            ChainOutcome::Cycle => {
                debug!(domain = %qname, links = chain.len(), "CNAME chain loops; giving up");
            }
        }
    }

    /// Swap in a freshly loaded set.
    ///
    /// Cloaked names whose target left the set are unblocked and forgotten;
    /// the rest are carried into the new set so they stay enforced.
    pub async fn apply_reload(&mut self, mut blocked: BlockSet) {
        for (qname, target) in self.cloaked.remove_unblocked(&blocked) {
            info!(domain = %qname, cname = %target, "Removing block of \"{}\" because cname \"{}\" is no longer blocked", qname, target);
            self.report.unblocks += 1;
            self.actuator.send(ActuatorCommand::Unblock(qname)).await;
        }
        for (qname, _) in self.cloaked.iter() {
            blocked.insert(qname);
        }

        self.blocked = blocked;
        self.report.reloads += 1;
        info!(
            blocked_domains = self.blocked.len(),
            cloaked_domains = self.cloaked.len(),
            "Block set reloaded"
        );
    }

    /// Process commands in submission order until every sender is dropped,
    /// then flush the actuator.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> EngineReport {
        info!(blocked_domains = self.blocked.len(), "Cloak engine started");

        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }

        self.shutdown().await
    }

    /// Flush queued actuator commands and report. Consumes the engine.
    pub async fn shutdown(self) -> EngineReport {
        self.state.send_replace(EngineState::Draining);
        debug!("Command channel closed; draining actuator queue");

        let mut report = self.report;
        report.blocked_domains = self.blocked.len();
        report.cloaked_domains = self.cloaked.len();
        report.actuator = self.actuator.shutdown().await;

        self.state.send_replace(EngineState::Stopped);
        report
    }
}
