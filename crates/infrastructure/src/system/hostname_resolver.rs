use async_trait::async_trait;
use routewatch_application::ports::HostnameResolver;
use routewatch_domain::DomainError;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// PTR lookup through the system resolver (`getnameinfo`).
///
/// The libc call blocks, so it runs on the blocking pool and is bounded by
/// a timeout. An abandoned lookup keeps its blocking thread until libc
/// returns.
pub struct SystemHostnameResolver {
    timeout: Duration,
}

impl SystemHostnameResolver {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SystemHostnameResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostnameResolver for SystemHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        debug!(ip = %ip, "Performing PTR lookup");

        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip));

        let hostname = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Ok(hostname))) => hostname,
            Ok(Ok(Err(e))) => {
                return Err(DomainError::ReverseLookupFailed(format!("{}: {}", ip, e)));
            }
            Ok(Err(join_error)) => {
                return Err(DomainError::ReverseLookupFailed(format!(
                    "{}: lookup task failed: {}",
                    ip, join_error
                )));
            }
            Err(_) => {
                return Err(DomainError::ReverseLookupFailed(format!(
                    "{}: timed out after {}ms",
                    ip,
                    self.timeout.as_millis()
                )));
            }
        };

        // getnameinfo falls back to the numeric form when no PTR exists.
        let hostname = hostname.trim_end_matches('.');
        if hostname.is_empty() || hostname.parse::<IpAddr>().is_ok() {
            debug!(ip = %ip, "PTR lookup returned no name");
            return Ok(None);
        }

        debug!(ip = %ip, hostname = %hostname, "PTR lookup successful");
        Ok(Some(hostname.to_string()))
    }
}
