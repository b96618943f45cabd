#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tapguard_application::ports::{
    BlockListSource, DnsMessageParser, DnstapDecoder, HostnameResolver, RecordConsumer,
    ResolverControl, TriggerListener,
};
use tapguard_domain::{
    ActuatorCommand, BlockSet, DnsMessage, DnstapMessage, DomainError, TransactionRecord,
};

#[derive(Clone, Default)]
pub struct MockHostnameResolver {
    answers: Arc<Mutex<HashMap<IpAddr, Result<Option<String>, DomainError>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockHostnameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hostname(&self, ip: &str, hostname: &str) {
        self.answers.lock().unwrap().insert(
            ip.parse().unwrap(),
            Ok(Some(hostname.to_string())),
        );
    }

    pub fn set_failure(&self, ip: &str) {
        self.answers.lock().unwrap().insert(
            ip.parse().unwrap(),
            Err(DomainError::HostnameLookup("timed out".to_string())),
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostnameResolver for MockHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get(&ip)
            .cloned()
            .unwrap_or(Ok(None))
    }
}

#[derive(Clone, Default)]
pub struct MockResolverControl {
    commands: Arc<Mutex<Vec<ActuatorCommand>>>,
    failing: Arc<Mutex<Vec<String>>>,
}

impl MockResolverControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, domain: &str) {
        self.failing.lock().unwrap().push(domain.to_string());
    }

    pub fn commands(&self) -> Vec<ActuatorCommand> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResolverControl for MockResolverControl {
    async fn execute(&self, command: &ActuatorCommand) -> Result<(), DomainError> {
        self.commands.lock().unwrap().push(command.clone());
        if self
            .failing
            .lock()
            .unwrap()
            .iter()
            .any(|d| d == command.domain())
        {
            return Err(DomainError::Actuator(format!(
                "local_zone {} failed",
                command.domain()
            )));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockBlockListSource {
    current: Arc<Mutex<Result<BlockSet, DomainError>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    loads: Arc<AtomicUsize>,
}

impl Default for MockBlockListSource {
    fn default() -> Self {
        Self {
            current: Arc::new(Mutex::new(Ok(BlockSet::new()))),
            delay: Arc::new(Mutex::new(None)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockBlockListSource {
    pub fn with_domains(domains: &[&str]) -> Self {
        let source = Self::default();
        source.set_domains(domains);
        source
    }

    pub fn set_domains(&self, domains: &[&str]) {
        *self.current.lock().unwrap() = Ok(BlockSet::from_domains(domains));
    }

    pub fn set_failure(&self, path: &str) {
        *self.current.lock().unwrap() = Err(DomainError::BlockListLoad {
            path: path.to_string(),
            reason: "No such file or directory".to_string(),
        });
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockListSource for MockBlockListSource {
    async fn load(&self) -> Result<BlockSet, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.current.lock().unwrap().clone()
    }
}

/// Frames are looked up by their exact bytes. `b"skip"` is a non-MESSAGE
/// envelope and `b"garbage"` an unidentifiable one.
#[derive(Clone, Default)]
pub struct MockDnstapDecoder {
    frames: Arc<Mutex<HashMap<Bytes, DnstapMessage>>>,
}

impl MockDnstapDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, frame: &'static [u8], tap: DnstapMessage) {
        self.frames
            .lock()
            .unwrap()
            .insert(Bytes::from_static(frame), tap);
    }
}

impl DnstapDecoder for MockDnstapDecoder {
    fn decode(&self, frame: &Bytes) -> Result<Option<DnstapMessage>, DomainError> {
        if frame.as_ref() == b"skip" {
            return Ok(None);
        }
        self.frames
            .lock()
            .unwrap()
            .get(frame)
            .cloned()
            .map(Some)
            .ok_or_else(|| DomainError::Framing("unknown envelope".to_string()))
    }
}

#[derive(Clone, Default)]
pub struct MockDnsMessageParser {
    messages: Arc<Mutex<HashMap<Bytes, DnsMessage>>>,
}

impl MockDnsMessageParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, wire: &'static [u8], message: DnsMessage) {
        self.messages
            .lock()
            .unwrap()
            .insert(Bytes::from_static(wire), message);
    }
}

impl DnsMessageParser for MockDnsMessageParser {
    fn parse(&self, wire: &[u8]) -> Option<DnsMessage> {
        self.messages.lock().unwrap().get(wire).cloned()
    }
}

/// Records what it receives and appends its name to a shared log on finish.
pub struct RecordingConsumer {
    name: String,
    pub records: Arc<Mutex<Vec<Arc<TransactionRecord>>>>,
    finished: Arc<Mutex<Vec<String>>>,
}

impl RecordingConsumer {
    pub fn new(name: &str, finished: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            records: Arc::new(Mutex::new(Vec::new())),
            finished,
        }
    }
}

#[async_trait]
impl RecordConsumer for RecordingConsumer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn consume(&mut self, record: Arc<TransactionRecord>) {
        self.records.lock().unwrap().push(record);
    }

    async fn finish(self: Box<Self>) {
        self.finished.lock().unwrap().push(self.name.clone());
    }
}

#[derive(Clone, Default)]
pub struct MockTriggerListener {
    stopped: Arc<AtomicBool>,
}

impl MockTriggerListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TriggerListener for MockTriggerListener {
    async fn stop(self: Box<Self>) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
