use async_trait::async_trait;
use tapguard_domain::{ActuatorCommand, DomainError};

/// Out-of-process control of the resolver enforcing block decisions.
#[async_trait]
pub trait ResolverControl: Send + Sync {
    async fn execute(&self, command: &ActuatorCommand) -> Result<(), DomainError>;
}
