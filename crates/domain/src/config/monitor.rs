use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Seconds between two polls of the connection table
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Upper bound on simultaneously running resolutions
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_poll_interval() -> u64 {
    5
}

fn default_max_concurrency() -> usize {
    20
}
