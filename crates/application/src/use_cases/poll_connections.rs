use crate::ports::ConnectionSource;
use crate::services::{DispatchEngine, SubmitOutcome};
use routewatch_domain::DomainError;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub observed: usize,
    pub dispatched: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

/// One monitor cycle: read the connection table and hand every destination
/// to the dispatch engine.
pub struct PollConnectionsUseCase {
    source: Arc<dyn ConnectionSource>,
    engine: Arc<DispatchEngine>,
}

impl PollConnectionsUseCase {
    pub fn new(source: Arc<dyn ConnectionSource>, engine: Arc<DispatchEngine>) -> Self {
        Self { source, engine }
    }

    pub async fn execute(&self) -> Result<PollSummary, DomainError> {
        let entries = self.source.poll().await?;
        let mut summary = PollSummary {
            observed: entries.len(),
            ..Default::default()
        };

        for entry in &entries {
            let outcome = match entry.destination_address.as_deref() {
                Some(destination) => self.engine.submit(destination).await,
                None => SubmitOutcome::Rejected,
            };

            match outcome {
                SubmitOutcome::Dispatched => {
                    debug!(
                        destination = entry.destination_address.as_deref().unwrap_or_default(),
                        protocol = entry.protocol.as_deref().unwrap_or("unknown"),
                        "New destination"
                    );
                    summary.dispatched += 1;
                }
                SubmitOutcome::Duplicate => summary.duplicates += 1,
                SubmitOutcome::Rejected => summary.rejected += 1,
            }
        }

        debug!(
            observed = summary.observed,
            dispatched = summary.dispatched,
            duplicates = summary.duplicates,
            rejected = summary.rejected,
            "Connection table processed"
        );

        Ok(summary)
    }
}
