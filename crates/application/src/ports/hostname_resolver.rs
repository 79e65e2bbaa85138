use async_trait::async_trait;
use routewatch_domain::DomainError;
use std::net::IpAddr;

/// Reverse (PTR) lookup.
///
/// `Ok(Some(name))` on success, `Ok(None)` when the address has no PTR
/// record, `Err` for every other failure.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError>;
}
