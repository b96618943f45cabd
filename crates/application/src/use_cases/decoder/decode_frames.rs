use super::{spawn_consumer, ConsumerTask, ReverseLookupCache};
use crate::ports::{DnsMessageParser, DnstapDecoder, RecordConsumer};
use bytes::Bytes;
use std::sync::Arc;
use tapguard_domain::{DomainError, TransactionRecord};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderReport {
    pub frames: u64,
    pub records: u64,
    pub skipped: u64,
}

struct Registered {
    name: String,
    sender: mpsc::Sender<Arc<TransactionRecord>>,
}

/// Decode loop: frame → [`TransactionRecord`] → every registered consumer.
pub struct DecodeFramesUseCase {
    decoder: Arc<dyn DnstapDecoder>,
    parser: Arc<dyn DnsMessageParser>,
    cache: ReverseLookupCache,
    consumers: Vec<Registered>,
}

impl DecodeFramesUseCase {
    pub fn new(
        decoder: Arc<dyn DnstapDecoder>,
        parser: Arc<dyn DnsMessageParser>,
        cache: ReverseLookupCache,
    ) -> Self {
        Self {
            decoder,
            parser,
            cache,
            consumers: Vec::new(),
        }
    }

    /// Consumers receive records, and are closed, in registration order.
    pub fn with_consumer(
        mut self,
        name: impl Into<String>,
        sender: mpsc::Sender<Arc<TransactionRecord>>,
    ) -> Self {
        self.consumers.push(Registered {
            name: name.into(),
            sender,
        });
        self
    }

    /// Start `consumer` on its own task and register it. The decoder holds
    /// the only sender, so the task finishes when [`run`](Self::run) returns.
    pub fn spawn_consumer(
        self,
        consumer: Box<dyn RecordConsumer>,
        buffer: usize,
    ) -> (Self, ConsumerTask) {
        let (sender, task) = spawn_consumer(consumer, buffer);
        let name = task.name.clone();
        (self.with_consumer(name, sender), task)
    }

    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Drain `frames` until the channel closes.
    ///
    /// Returns `Err` only for an unidentifiable envelope; consumer channels
    /// are closed on both paths.
    pub async fn run(
        mut self,
        mut frames: mpsc::Receiver<Bytes>,
    ) -> Result<DecoderReport, DomainError> {
        let mut report = DecoderReport::default();
        info!(consumers = self.consumers.len(), "Decoder started");

        while let Some(frame) = frames.recv().await {
            report.frames += 1;

            let tap = match self.decoder.decode(&frame) {
                Ok(Some(tap)) => tap,
                Ok(None) => {
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    error!(error = %e, frame = report.frames, "Unrecoverable framing error");
                    self.close_consumers();
                    return Err(e);
                }
            };

            let dns = tap.dns_payload().and_then(|wire| self.parser.parse(wire));
            let client = tap.query_address.clone().unwrap_or_default();
            let client_host = self.cache.lookup(&client).await;

            let record = Arc::new(TransactionRecord::new(tap, dns, client_host));
            report.records += 1;
            self.deliver(record).await;
        }

        self.close_consumers();
        info!(
            frames = report.frames,
            records = report.records,
            skipped = report.skipped,
            "Decoder finished"
        );
        Ok(report)
    }

    async fn deliver(&mut self, record: Arc<TransactionRecord>) {
        let mut closed = Vec::new();
        for (idx, consumer) in self.consumers.iter().enumerate() {
            if consumer.sender.send(Arc::clone(&record)).await.is_err() {
                warn!(consumer = %consumer.name, "Consumer stopped early; no longer delivering to it");
                closed.push(idx);
            }
        }
        for idx in closed.into_iter().rev() {
            self.consumers.remove(idx);
        }
    }

    fn close_consumers(&mut self) {
        for consumer in self.consumers.drain(..) {
            debug!(consumer = %consumer.name, "Closing consumer channel");
            drop(consumer.sender);
        }
    }
}
