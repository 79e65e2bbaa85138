use serde::{Deserialize, Serialize};

/// RouterOS API endpoint and credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Seconds allowed for the TCP connect and for each API round-trip
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl RouterConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            timeout: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "192.168.88.1".to_string()
}

fn default_port() -> u16 {
    8728
}

fn default_username() -> String {
    "monitor".to_string()
}

fn default_password() -> String {
    "123456".to_string()
}

fn default_timeout() -> u64 {
    10
}
