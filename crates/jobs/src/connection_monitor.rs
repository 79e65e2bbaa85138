use routewatch_application::use_cases::PollConnectionsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Polls the connection table until cancelled.
///
/// The interval is a pause after each cycle, not a fixed rate, so a slow poll
/// or a saturated dispatch engine stretches the cycle.
pub struct ConnectionMonitorJob {
    poll: Arc<PollConnectionsUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ConnectionMonitorJob {
    pub fn new(poll: Arc<PollConnectionsUseCase>) -> Self {
        Self {
            poll,
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    pub async fn run(&self) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Starting connection monitor"
        );

        let mut cycles: u64 = 0;
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                result = self.poll.execute() => {
                    cycles += 1;
                    match result {
                        Ok(summary) => {
                            if summary.dispatched > 0 {
                                debug!(
                                    cycle = cycles,
                                    observed = summary.observed,
                                    dispatched = summary.dispatched,
                                    "New destinations dispatched"
                                );
                            }
                        }
                        Err(e) => {
                            error!(cycle = cycles, error = %e, "Connection poll failed");
                        }
                    }
                }
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(cycles, "ConnectionMonitorJob: shutting down");
    }
}
