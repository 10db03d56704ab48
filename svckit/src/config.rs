use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Log-query endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub search_param: String,
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8001/api/logs".to_string(),
            search_param: "search".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Debounce window and poll cadence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollingConfig {
    pub debounce_ms: u64,
    pub interval_ms: u64,
}

impl PollingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            interval_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_dir: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "log_dash=info,svckit=info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}
