use async_trait::async_trait;
use routewatch_application::ports::WhoisClient;
use routewatch_domain::DomainError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_WHOIS_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the system `whois` client with the address as its only argument.
///
/// The child is killed if the query is dropped or times out.
pub struct WhoisCommand {
    program: String,
    timeout: Duration,
}

impl WhoisCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_WHOIS_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl WhoisClient for WhoisCommand {
    async fn query(&self, ip: &str) -> Result<String, DomainError> {
        // Never let an address be read as an option.
        if ip.is_empty() || ip.starts_with('-') {
            return Err(DomainError::InvalidIpAddress(ip.to_string()));
        }

        debug!(ip, program = %self.program, "Running WHOIS query");

        let child = Command::new(&self.program)
            .arg(ip)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| DomainError::WhoisTimeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| DomainError::WhoisFailed(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::WhoisFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
