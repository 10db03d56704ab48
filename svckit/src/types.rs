use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const SENTIMENT_POSITIVE: &str = "POSITIVE";
pub const SENTIMENT_NEGATIVE: &str = "NEGATIVE";
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// One enriched log line as returned by the query API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    #[serde(
        rename = "@timestamp",
        default,
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub ai_sentiment: Option<String>,
    #[serde(default)]
    pub ai_sentiment_score: Option<f64>,
}

impl LogRecord {
    /// Sentiment label, `UNKNOWN` when absent or empty.
    pub fn sentiment_label(&self) -> &str {
        non_empty_or_unknown(self.ai_sentiment.as_deref())
    }

    /// Service name, `UNKNOWN` when absent or empty.
    pub fn service_name(&self) -> &str {
        non_empty_or_unknown(self.service.as_deref())
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_LABEL,
    }
}

/// Body of `GET /api/logs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogRecord>,
}

/// Accepts RFC 3339 as well as offset-less ISO-8601 (taken as UTC).
/// Anything else decodes to `None` instead of failing the whole response.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
