use crate::ports::RecordConsumer;
use std::sync::Arc;
use tapguard_domain::TransactionRecord;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

/// A running consumer task. Holds no sender: the task ends once whoever got
/// the sender from [`spawn_consumer`] drops it.
pub struct ConsumerTask {
    pub name: String,
    task: JoinHandle<()>,
}

impl ConsumerTask {
    /// Wait for the consumer to drain its channel and finish.
    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}

/// Run `consumer` on its own task behind a channel of `buffer` records.
///
/// The task feeds records in arrival order and calls `finish` once the
/// returned sender, and every clone of it, is dropped.
pub fn spawn_consumer(
    mut consumer: Box<dyn RecordConsumer>,
    buffer: usize,
) -> (mpsc::Sender<Arc<TransactionRecord>>, ConsumerTask) {
    let (sender, mut rx) = mpsc::channel::<Arc<TransactionRecord>>(buffer.max(1));
    let name = consumer.name().to_string();
    let task_name = name.clone();

    let task = tokio::spawn(async move {
        debug!(consumer = %task_name, "Consumer started");
        let mut consumed = 0u64;
        while let Some(record) = rx.recv().await {
            consumer.consume(record).await;
            consumed += 1;
        }
        consumer.finish().await;
        info!(consumer = %task_name, consumed, "Consumer finished");
    });

    (sender, ConsumerTask { name, task })
}
