use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DashError {
    /// True for the failures a log fetch can produce.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            DashError::NetworkError(_) | DashError::HttpStatus(_) | DashError::DecodeError(_)
        )
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DashError::DecodeError(err.to_string())
        } else if let Some(status) = err.status() {
            DashError::HttpStatus(status.as_u16())
        } else {
            DashError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::DecodeError(err.to_string())
    }
}

impl From<config::ConfigError> for DashError {
    fn from(err: config::ConfigError) -> Self {
        DashError::ConfigError(err.to_string())
    }
}
