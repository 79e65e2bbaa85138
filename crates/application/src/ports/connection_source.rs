use async_trait::async_trait;
use routewatch_domain::{ConnectionEntry, DomainError};

#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// Snapshot of the current connection table
    async fn poll(&self) -> Result<Vec<ConnectionEntry>, DomainError>;
}
