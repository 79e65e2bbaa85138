use crate::ports::{HostnameResolver, WhoisClient};
use crate::services::{extract_org_info, IdentityCache};
use routewatch_domain::{DomainError, Identity};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_WHOIS_TIMEOUT: Duration = Duration::from_secs(5);

/// Cache → PTR → WHOIS → NotFound.
///
/// Total: every stage failure falls through to the next one and the call
/// always yields an identity.
pub struct ResolveIdentityUseCase {
    cache: Arc<IdentityCache>,
    hostname_resolver: Arc<dyn HostnameResolver>,
    whois: Arc<dyn WhoisClient>,
    whois_timeout: Duration,
    reverse_dns: bool,
}

impl ResolveIdentityUseCase {
    pub fn new(
        cache: Arc<IdentityCache>,
        hostname_resolver: Arc<dyn HostnameResolver>,
        whois: Arc<dyn WhoisClient>,
    ) -> Self {
        Self {
            cache,
            hostname_resolver,
            whois,
            whois_timeout: DEFAULT_WHOIS_TIMEOUT,
            reverse_dns: true,
        }
    }

    pub fn with_whois_timeout(mut self, timeout: Duration) -> Self {
        self.whois_timeout = timeout;
        self
    }

    pub fn with_reverse_dns(mut self, enabled: bool) -> Self {
        self.reverse_dns = enabled;
        self
    }

    pub async fn execute(&self, ip: &str) -> Identity {
        if let Some(cached) = self.cache.lookup(ip) {
            debug!(ip, "Identity cache hit");
            return cached;
        }

        let identity = match self.lookup_ptr(ip).await {
            Some(hostname) => Identity::Domain(hostname),
            None => match self.lookup_whois(ip).await {
                Some(org) => Identity::OrgInfo(org),
                None => Identity::NotFound,
            },
        };

        self.cache.store(ip, identity)
    }

    async fn lookup_ptr(&self, ip: &str) -> Option<String> {
        if !self.reverse_dns {
            return None;
        }

        let addr: IpAddr = match ip.parse() {
            Ok(addr) => addr,
            Err(_) => {
                let e = DomainError::InvalidIpAddress(ip.to_string());
                debug!(ip, error = %e, "Skipping PTR lookup");
                return None;
            }
        };

        match self.hostname_resolver.resolve_hostname(addr).await {
            Ok(Some(hostname)) => Some(hostname),
            Ok(None) => {
                debug!(ip, "No PTR record, falling back to WHOIS");
                None
            }
            Err(e) => {
                debug!(ip, error = %e, "PTR lookup failed, falling back to WHOIS");
                None
            }
        }
    }

    async fn lookup_whois(&self, ip: &str) -> Option<String> {
        let response = match tokio::time::timeout(self.whois_timeout, self.whois.query(ip)).await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                debug!(ip, error = %e, "WHOIS query failed");
                return None;
            }
            Err(_) => {
                let e = DomainError::WhoisTimeout {
                    timeout_ms: self.whois_timeout.as_millis() as u64,
                };
                debug!(ip, error = %e, "WHOIS query abandoned");
                return None;
            }
        };

        let org = extract_org_info(&response);
        if org.is_none() {
            debug!(ip, "WHOIS response has no organization field");
        }
        org
    }
}
