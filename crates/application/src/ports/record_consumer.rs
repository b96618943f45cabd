use async_trait::async_trait;
use std::sync::Arc;
use tapguard_domain::TransactionRecord;

/// A downstream stage fed with every decoded record, in decode order.
///
/// Each consumer runs on its own task; records arrive through a bounded
/// channel and are shared read-only.
#[async_trait]
pub trait RecordConsumer: Send {
    fn name(&self) -> &str;

    async fn consume(&mut self, record: Arc<TransactionRecord>);

    /// Called once after the input channel closes. Flush and tear down here.
    async fn finish(self: Box<Self>);
}
