use async_trait::async_trait;
use tapguard_domain::{BlockSet, DomainError};

#[async_trait]
pub trait BlockListSource: Send + Sync {
    /// Read the base deny, supplementary deny and allow lists and compose
    /// them into a fresh [`BlockSet`].
    async fn load(&self) -> Result<BlockSet, DomainError>;
}
