use async_trait::async_trait;
use routewatch_domain::DomainError;

/// Raw WHOIS text for an address. Callers bound the call with their own timeout.
#[async_trait]
pub trait WhoisClient: Send + Sync {
    async fn query(&self, ip: &str) -> Result<String, DomainError>;
}
