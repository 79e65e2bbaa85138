#![allow(dead_code)]

use async_trait::async_trait;
use routewatch_application::ports::{
    ConnectionSource, HostnameResolver, ResolutionSink, WhoisClient,
};
use routewatch_domain::{ConnectionEntry, DomainError, Identity};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{RwLock, Semaphore};

/// Tracks how many calls are inside a mock at once.
#[derive(Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

pub struct MockHostnameResolver {
    responses: Arc<RwLock<HashMap<IpAddr, Option<String>>>>,
    calls: Arc<Mutex<Vec<IpAddr>>>,
    call_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
    gate: Option<Arc<Semaphore>>,
    delay: Option<Duration>,
    pub in_flight: Arc<InFlight>,
}

impl MockHostnameResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
            gate: None,
            delay: None,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Every lookup blocks until a permit is added to the returned semaphore.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut resolver = Self::new();
        resolver.gate = Some(gate.clone());
        (resolver, gate)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_response(&self, ip: &str, hostname: Option<&str>) {
        self.responses
            .write()
            .await
            .insert(ip.parse().unwrap(), hostname.map(|h| h.to_string()));
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, ip: &str) -> usize {
        let ip: IpAddr = ip.parse().unwrap();
        self.calls.lock().unwrap().iter().filter(|c| **c == ip).count()
    }
}

#[async_trait]
impl HostnameResolver for MockHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(ip);
        self.in_flight.enter();

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = if *self.should_fail.read().await {
            Err(DomainError::ReverseLookupFailed(
                "resolver unreachable".to_string(),
            ))
        } else {
            Ok(self
                .responses
                .read()
                .await
                .get(&ip)
                .cloned()
                .unwrap_or(None))
        };

        self.in_flight.leave();
        result
    }
}

pub struct MockWhoisClient {
    responses: Arc<RwLock<HashMap<String, String>>>,
    call_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
    delay: Option<Duration>,
}

impl MockWhoisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_response(&self, ip: &str, text: &str) {
        self.responses
            .write()
            .await
            .insert(ip.to_string(), text.to_string());
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhoisClient for MockWhoisClient {
    async fn query(&self, ip: &str) -> Result<String, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.read().await {
            return Err(DomainError::WhoisFailed("exit status: 1".to_string()));
        }

        Ok(self
            .responses
            .read()
            .await
            .get(ip)
            .cloned()
            .unwrap_or_default())
    }
}

/// Replays queued poll results; an exhausted queue yields an empty table.
pub struct MockConnectionSource {
    polls: Mutex<VecDeque<Result<Vec<ConnectionEntry>, DomainError>>>,
    poll_count: AtomicU64,
}

impl MockConnectionSource {
    pub fn new() -> Self {
        Self {
            polls: Mutex::new(VecDeque::new()),
            poll_count: AtomicU64::new(0),
        }
    }

    pub fn push_poll(&self, destinations: &[&str]) {
        let entries = destinations
            .iter()
            .map(|d| ConnectionEntry::new(*d))
            .collect();
        self.polls.lock().unwrap().push_back(Ok(entries));
    }

    pub fn push_entries(&self, entries: Vec<ConnectionEntry>) {
        self.polls.lock().unwrap().push_back(Ok(entries));
    }

    pub fn push_error(&self, error: DomainError) {
        self.polls.lock().unwrap().push_back(Err(error));
    }

    pub fn poll_count(&self) -> u64 {
        self.poll_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionSource for MockConnectionSource {
    async fn poll(&self) -> Result<Vec<ConnectionEntry>, DomainError> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    emitted: Mutex<Vec<(String, Identity)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> Vec<(String, Identity)> {
        self.emitted.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }

    pub fn identity_for(&self, ip: &str) -> Option<Identity> {
        self.emitted
            .lock()
            .unwrap()
            .iter()
            .find(|(seen, _)| seen == ip)
            .map(|(_, identity)| identity.clone())
    }
}

impl ResolutionSink for RecordingSink {
    fn emit(&self, ip: &str, identity: &Identity) {
        self.emitted
            .lock()
            .unwrap()
            .push((ip.to_string(), identity.clone()));
    }
}
