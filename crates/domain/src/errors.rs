use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Connection to {host} failed: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Authentication rejected by router: {0}")]
    AuthenticationFailed(String),

    #[error("Router protocol error: {0}")]
    ProtocolError(String),

    #[error("Connection table poll failed: {0}")]
    PollFailed(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Reverse lookup failed: {0}")]
    ReverseLookupFailed(String),

    #[error("WHOIS query timed out after {timeout_ms}ms")]
    WhoisTimeout { timeout_ms: u64 },

    #[error("WHOIS query failed: {0}")]
    WhoisFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Errors that leave the router session unusable.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            DomainError::ConnectionFailed { .. }
                | DomainError::ProtocolError(_)
                | DomainError::IoError(_)
        )
    }
}
