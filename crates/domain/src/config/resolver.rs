use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_whois_timeout")]
    pub whois_timeout: u64,

    #[serde(default = "default_whois_command")]
    pub whois_command: String,

    /// When disabled, addresses go straight to WHOIS
    #[serde(default = "default_true")]
    pub reverse_dns: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            whois_timeout: default_whois_timeout(),
            whois_command: default_whois_command(),
            reverse_dns: true,
        }
    }
}

fn default_whois_timeout() -> u64 {
    5
}

fn default_whois_command() -> String {
    "whois".to_string()
}

fn default_true() -> bool {
    true
}
