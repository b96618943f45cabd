use std::sync::Arc;
use tapguard_domain::{BlockSet, TransactionRecord};

/// Unit of work on the engine's serialized command channel.
///
/// Traffic and reloads share one channel, so each record is evaluated
/// against whichever [`BlockSet`] was live when it was enqueued.
#[derive(Debug)]
pub enum Command {
    Traffic(Arc<TransactionRecord>),
    ReloadBlockSet(BlockSet),
}
