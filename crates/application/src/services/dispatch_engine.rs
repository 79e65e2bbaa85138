use crate::ports::ResolutionSink;
use crate::use_cases::ResolveIdentityUseCase;
use dashmap::DashSet;
use routewatch_domain::normalize_destination;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

pub const DEFAULT_MAX_CONCURRENCY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing usable after normalization
    Rejected,
    /// Address was already dispatched earlier
    Duplicate,
    /// A resolution task was launched
    Dispatched,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub submitted: u64,
    pub rejected: u64,
    pub duplicates: u64,
    pub dispatched: u64,
    pub completed: u64,
    pub active: usize,
    pub peak_active: usize,
    pub seen: usize,
}

#[derive(Default)]
struct DispatchCounters {
    submitted: AtomicU64,
    rejected: AtomicU64,
    duplicates: AtomicU64,
    dispatched: AtomicU64,
    completed: AtomicU64,
    active: AtomicUsize,
    peak_active: AtomicUsize,
}

/// Deduplicating, semaphore-gated launcher of resolution tasks.
///
/// Each distinct address is dispatched at most once per process. `submit`
/// records the address synchronously and then waits for an admission permit,
/// so a saturated pool stalls the caller instead of dropping work.
pub struct DispatchEngine {
    resolver: Arc<ResolveIdentityUseCase>,
    sink: Arc<dyn ResolutionSink>,
    seen: DashSet<String>,
    admission: Arc<Semaphore>,
    counters: Arc<DispatchCounters>,
    max_concurrency: usize,
}

impl DispatchEngine {
    pub fn new(
        resolver: Arc<ResolveIdentityUseCase>,
        sink: Arc<dyn ResolutionSink>,
        max_concurrency: usize,
    ) -> Self {
        let max_concurrency = max_concurrency.clamp(1, u32::MAX as usize);

        Self {
            resolver,
            sink,
            seen: DashSet::new(),
            admission: Arc::new(Semaphore::new(max_concurrency)),
            counters: Arc::new(DispatchCounters::default()),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        self.counters.submitted.fetch_add(1, Ordering::Relaxed);

        let Some(ip) = normalize_destination(raw) else {
            self.counters.rejected.fetch_add(1, Ordering::Relaxed);
            return SubmitOutcome::Rejected;
        };

        // Membership check and insertion are one step.
        if !self.seen.insert(ip.clone()) {
            self.counters.duplicates.fetch_add(1, Ordering::Relaxed);
            return SubmitOutcome::Duplicate;
        }

        let permit = match Arc::clone(&self.admission).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!(ip = %ip, error = %e, "Admission closed, address not dispatched");
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                return SubmitOutcome::Rejected;
            }
        };

        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        debug!(ip = %ip, "Dispatching resolution");

        let resolver = Arc::clone(&self.resolver);
        let sink = Arc::clone(&self.sink);
        let counters = Arc::clone(&self.counters);

        tokio::spawn(async move {
            let _work = ActiveWork::begin(counters, permit);
            let identity = resolver.execute(&ip).await;
            sink.emit(&ip, &identity);
        });

        SubmitOutcome::Dispatched
    }

    pub fn is_seen(&self, ip: &str) -> bool {
        self.seen.contains(ip)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn active_count(&self) -> usize {
        self.counters.active.load(Ordering::SeqCst)
    }

    /// Resolves once every dispatched task has released its permit.
    pub async fn wait_idle(&self) {
        match self.admission.acquire_many(self.max_concurrency as u32).await {
            Ok(all) => drop(all),
            Err(e) => warn!(error = %e, "Admission closed while waiting for idle"),
        }
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            submitted: self.counters.submitted.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            duplicates: self.counters.duplicates.load(Ordering::Relaxed),
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            completed: self.counters.completed.load(Ordering::Relaxed),
            active: self.counters.active.load(Ordering::SeqCst),
            peak_active: self.counters.peak_active.load(Ordering::SeqCst),
            seen: self.seen.len(),
        }
    }
}

/// Holds one admission permit for the lifetime of a resolution task.
///
/// The active count is decremented in `drop` before the permit field is
/// released, on every exit path including unwinding.
struct ActiveWork {
    counters: Arc<DispatchCounters>,
    _permit: OwnedSemaphorePermit,
}

impl ActiveWork {
    fn begin(counters: Arc<DispatchCounters>, permit: OwnedSemaphorePermit) -> Self {
        let now = counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        counters.peak_active.fetch_max(now, Ordering::SeqCst);
        Self {
            counters,
            _permit: permit,
        }
    }
}

impl Drop for ActiveWork {
    fn drop(&mut self) {
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
        self.counters.completed.fetch_add(1, Ordering::Relaxed);
    }
}
