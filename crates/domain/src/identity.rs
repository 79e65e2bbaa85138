use std::fmt;

/// What an IP address resolved to.
///
/// Once an identity has been computed for an address it never changes for
/// the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Hostname from a PTR record
    Domain(String),
    /// Organization field scraped from a WHOIS response
    OrgInfo(String),
    NotFound,
}

impl Identity {
    pub fn kind(&self) -> &'static str {
        match self {
            Identity::Domain(_) => "domain",
            Identity::OrgInfo(_) => "whois",
            Identity::NotFound => "not_found",
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Identity::Domain(name) => Some(name),
            Identity::OrgInfo(info) => Some(info),
            Identity::NotFound => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Domain(name) => write!(f, "{}", name),
            Identity::OrgInfo(info) => write!(f, "[WHOIS: {}]", info),
            Identity::NotFound => write!(f, "Not Found"),
        }
    }
}
