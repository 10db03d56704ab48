// services/log-dash/src/mock.rs
//
// Simulated log source for demo mode
//

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use tokio::sync::Mutex;

use svckit::types::{SENTIMENT_NEGATIVE, SENTIMENT_POSITIVE};
use svckit::{DashError, LogRecord};

use crate::api::LogSource;

const SERVICES: &[&str] = &[
    "payment-api",
    "user-service",
    "order-service",
    "frontend-web",
    "recommendation-engine",
];

const LEVELS: &[&str] = &["INFO", "INFO", "INFO", "WARN", "ERROR", "DEBUG"];

// (message, reads as negative)
const MESSAGES: &[(&str, bool)] = &[
    ("User login successful for user_id: 123", false),
    ("Payment processed successfully. OrderID: 456", false),
    ("New user registered: demo@example.com", false),
    ("Order 789 shipped.", false),
    ("Data export job complete.", false),
    ("Payment failed: Invalid CVC.", true),
    ("Database connection timeout.", true),
    ("User authentication failed: Bad credentials.", true),
    ("NullPointerException in processOrder()", true),
    ("API gateway returned 503 Service Unavailable.", true),
];

/// Keeps at most this many generated records around
const MAX_BUFFERED: usize = 500;
/// Matches the query API page size
const PAGE_SIZE: usize = 50;

/// In-process stand-in for the query API.
///
/// Every fetch "ingests" a few new records, then answers like the real
/// endpoint: case-insensitive match on message, service or level, newest
/// first, one page.
pub struct DemoLogSource {
    buffer: Mutex<Vec<LogRecord>>,
    failure_ratio: (u32, u32),
}

impl DemoLogSource {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let backlog = (0..40)
            .rev()
            .map(|age| random_record(&mut rng, ChronoDuration::seconds(age * 2)))
            .collect();

        Self {
            buffer: Mutex::new(backlog),
            failure_ratio: (1, 25),
        }
    }

    /// Demo source that never simulates an outage
    pub fn reliable() -> Self {
        Self {
            failure_ratio: (0, 1),
            ..Self::new()
        }
    }
}

impl Default for DemoLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for DemoLogSource {
    async fn fetch_logs(&self, term: &str) -> Result<Vec<LogRecord>, DashError> {
        let mut buffer = self.buffer.lock().await;

        let (fail_num, fail_den) = self.failure_ratio;
        let (arrivals, failed) = {
            let mut rng = rand::thread_rng();
            let arrivals = rng.gen_range(0..4);
            for _ in 0..arrivals {
                buffer.push(random_record(&mut rng, ChronoDuration::zero()));
            }
            (arrivals, fail_num > 0 && rng.gen_ratio(fail_num, fail_den))
        };

        if buffer.len() > MAX_BUFFERED {
            let excess = buffer.len() - MAX_BUFFERED;
            buffer.drain(..excess);
        }

        if failed {
            return Err(DashError::HttpStatus(503));
        }

        tracing::trace!(arrivals, "demo source ingested records");
        Ok(search(&buffer, term))
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}

fn search(buffer: &[LogRecord], term: &str) -> Vec<LogRecord> {
    let needle = term.trim().to_lowercase();
    buffer
        .iter()
        .rev()
        .filter(|record| {
            needle.is_empty()
                || record.message.to_lowercase().contains(&needle)
                || record.service_name().to_lowercase().contains(&needle)
                || record.level.to_lowercase().contains(&needle)
        })
        .take(PAGE_SIZE)
        .cloned()
        .collect()
}

fn random_record<R: Rng>(rng: &mut R, age: ChronoDuration) -> LogRecord {
    let service = SERVICES[rng.gen_range(0..SERVICES.len())];
    let level = LEVELS[rng.gen_range(0..LEVELS.len())];
    let (message, negative) = MESSAGES[rng.gen_range(0..MESSAGES.len())];

    // Occasionally leave a record unscored, as the enrichment worker does
    let (sentiment, score) = if rng.gen_ratio(1, 15) {
        (None, None)
    } else {
        let label = if negative { SENTIMENT_NEGATIVE } else { SENTIMENT_POSITIVE };
        (Some(label.to_string()), Some(rng.gen_range(0.55..1.0)))
    };

    LogRecord {
        timestamp: Some(Utc::now() - age),
        service: Some(service.to_string()),
        level: level.to_string(),
        message: message.to_string(),
        ai_sentiment: sentiment,
        ai_sentiment_score: score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unfiltered_page_is_newest_first() {
        let source = DemoLogSource::reliable();
        let logs = source.fetch_logs("").await.unwrap();

        assert!(!logs.is_empty());
        assert!(logs.len() <= PAGE_SIZE);
        assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_search_matches_service_message_or_level() {
        let source = DemoLogSource::reliable();

        for term in ["payment", "ERROR", "timeout"] {
            let needle = term.to_lowercase();
            let logs = source.fetch_logs(term).await.unwrap();
            assert!(logs.iter().all(|r| {
                r.message.to_lowercase().contains(&needle)
                    || r.service_name().to_lowercase().contains(&needle)
                    || r.level.to_lowercase().contains(&needle)
            }));
        }
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let source = DemoLogSource::reliable();
        let logs = source.fetch_logs("no-such-thing-anywhere").await.unwrap();
        assert!(logs.is_empty());
    }
}
