use async_trait::async_trait;

/// Accepts external block-list reload triggers until stopped.
#[async_trait]
pub trait TriggerListener: Send {
    async fn stop(self: Box<Self>);
}
