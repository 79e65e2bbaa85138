#![allow(dead_code)]

use async_trait::async_trait;
use routewatch_application::ports::{
    ConnectionSource, HostnameResolver, ResolutionSink, WhoisClient,
};
use routewatch_application::services::{DispatchEngine, IdentityCache};
use routewatch_application::use_cases::{PollConnectionsUseCase, ResolveIdentityUseCase};
use routewatch_domain::{ConnectionEntry, DomainError, Identity};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// PTR answers from a fixed table.
pub struct StaticHostnameResolver {
    names: HashMap<IpAddr, String>,
}

impl StaticHostnameResolver {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            names: entries
                .iter()
                .map(|(ip, name)| (ip.parse().unwrap(), name.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl HostnameResolver for StaticHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        Ok(self.names.get(&ip).cloned())
    }
}

pub struct FailingWhoisClient;

#[async_trait]
impl WhoisClient for FailingWhoisClient {
    async fn query(&self, _ip: &str) -> Result<String, DomainError> {
        Err(DomainError::WhoisFailed("whois unavailable".to_string()))
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
    pub fn emitted(&self) -> Vec<(String, Identity)> {
        self.emitted.lock().unwrap().clone()
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

pub struct Pipeline {
    pub source: Arc<MockConnectionSource>,
    pub sink: Arc<RecordingSink>,
    pub engine: Arc<DispatchEngine>,
    pub poll: Arc<PollConnectionsUseCase>,
}

pub fn pipeline(ptr: &[(&str, &str)]) -> Pipeline {
    let resolver = Arc::new(ResolveIdentityUseCase::new(
        Arc::new(IdentityCache::new()),
        Arc::new(StaticHostnameResolver::new(ptr)),
        Arc::new(FailingWhoisClient),
    ));
    let source = Arc::new(MockConnectionSource::new());
    let sink = Arc::new(RecordingSink::default());
    let engine = Arc::new(DispatchEngine::new(resolver, sink.clone(), 4));
    let poll = Arc::new(PollConnectionsUseCase::new(source.clone(), engine.clone()));

    Pipeline {
        source,
        sink,
        engine,
        poll,
    }
}
