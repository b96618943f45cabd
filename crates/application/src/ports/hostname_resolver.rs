use async_trait::async_trait;
use std::net::IpAddr;
use tapguard_domain::DomainError;

#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// Reverse-resolve `ip`. `Ok(None)` means the resolver answered without
    /// a usable name.
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError>;
}
