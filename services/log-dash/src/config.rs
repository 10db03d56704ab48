use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use svckit::config::{ApiConfig, ObservabilityConfig, PollingConfig};
use svckit::DashError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub observability: ObservabilityConfig,
}

/// Load configuration from an optional file, then `LOG_DASH__*` env vars.
pub fn load_config(path: Option<&str>) -> Result<DashConfig, DashError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("LOG_DASH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: DashConfig = config.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &DashConfig) -> Result<(), DashError> {
    if config.api.endpoint.trim().is_empty() {
        return Err(DashError::ConfigError("api.endpoint must not be empty".into()));
    }
    if config.polling.interval_ms == 0 {
        return Err(DashError::ConfigError("polling.interval_ms must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.polling.debounce_ms, 300);
        assert_eq!(config.polling.interval_ms, 3_000);
        assert_eq!(config.api.search_param, "search");
    }

    #[test]
    #[serial]
    fn test_partial_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log-dash.yaml");
        fs::write(
            &path,
            "api:\n  endpoint: http://query-api:8001/api/logs\npolling:\n  interval_ms: 5000\n",
        )
        .unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.api.endpoint, "http://query-api:8001/api/logs");
        assert_eq!(config.api.timeout_ms, 5_000);
        assert_eq!(config.polling.interval_ms, 5_000);
        assert_eq!(config.polling.debounce_ms, 300);
    }

    #[test]
    #[serial]
    fn test_full_round_trip_through_yaml() {
        let mut expected = DashConfig::default();
        expected.api.endpoint = "http://10.0.0.5:8001/api/logs".to_string();
        expected.observability.log_dir = "/var/log/log-dash".to_string();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.yaml");
        fs::write(&path, serde_yaml::to_string(&expected).unwrap()).unwrap();

        assert_eq!(load_config(path.to_str()).unwrap(), expected);
    }

    #[test]
    #[serial]
    fn test_zero_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "polling:\n  interval_ms: 0\n").unwrap();

        assert!(matches!(
            load_config(path.to_str()),
            Err(DashError::ConfigError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_missing_file_is_error() {
        assert!(load_config(Some("/nonexistent/log-dash.yaml")).is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_defaults() {
        env::set_var("LOG_DASH__API__ENDPOINT", "http://logs.internal:9000/api/logs");
        env::set_var("LOG_DASH__POLLING__INTERVAL_MS", "5000");

        let loaded = load_config(None);

        env::remove_var("LOG_DASH__API__ENDPOINT");
        env::remove_var("LOG_DASH__POLLING__INTERVAL_MS");

        let config = loaded.unwrap();
        assert_eq!(config.api.endpoint, "http://logs.internal:9000/api/logs");
        assert_eq!(config.polling.interval_ms, 5_000);
        assert_eq!(config.polling.debounce_ms, 300);
    }
}
