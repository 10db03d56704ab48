// services/log-dash/src/api.rs
//
// Log sources and the fetch dispatcher
//

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use svckit::config::ApiConfig;
use svckit::{DashError, LogRecord, LogsResponse};

use crate::poller::FetchRequest;
use crate::state::FetchOutcome;

/// Anything that can answer a search with log records
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn fetch_logs(&self, term: &str) -> Result<Vec<LogRecord>, DashError>;
    fn describe(&self) -> String;
}

/// HTTP client for the query API (`GET <endpoint>?search=<term>`)
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: String,
    search_param: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, DashError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            search_param: config.search_param.clone(),
        })
    }
}

#[async_trait]
impl LogSource for ApiClient {
    async fn fetch_logs(&self, term: &str) -> Result<Vec<LogRecord>, DashError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(self.search_param.as_str(), term)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashError::HttpStatus(status.as_u16()));
        }

        let body: LogsResponse = response.json().await?;
        Ok(body.logs)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Spawns fetches on the runtime and reports outcomes back to the UI loop.
///
/// Fetches are never cancelled; several may be in flight at once.
pub struct FetchDispatcher {
    source: Arc<dyn LogSource>,
    outcomes: UnboundedSender<FetchOutcome>,
    runtime: Handle,
}

impl FetchDispatcher {
    pub fn new(source: Arc<dyn LogSource>, outcomes: UnboundedSender<FetchOutcome>, runtime: Handle) -> Self {
        Self {
            source,
            outcomes,
            runtime,
        }
    }

    pub fn dispatch(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes.clone();

        debug!(seq = request.seq, term = %request.term, "dispatching fetch");
        self.runtime.spawn(async move {
            let result = source.fetch_logs(&request.term).await;
            if let Err(ref e) = result {
                debug!(seq = request.seq, "fetch from {} failed: {}", source.describe(), e);
            }
            // Receiver gone means the dashboard is shutting down
            let _ = outcomes.send(FetchOutcome { request, result });
        });
    }
}
