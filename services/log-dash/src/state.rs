// services/log-dash/src/state.rs
//
// Dashboard state management
//
// All mutation goes through the transition methods below, driven by the UI
// loop. Fetching happens elsewhere; this module only decides when a fetch is
// due and whether its outcome may still be applied.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use svckit::config::PollingConfig;
use svckit::{DashError, LogRecord};

use crate::aggregate::{SummaryCache, SummaryTables};
use crate::poller::{FetchRequest, Poller};
use crate::search::Debouncer;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch logs. Is the Query API running?";

/// A finished fetch, returned to the UI loop with the request it answers.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: Result<Vec<LogRecord>, DashError>,
}

/// What `apply` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Records,
    Failure,
    Stale,
}

#[derive(Debug)]
pub struct DashboardState {
    search: Debouncer,
    poller: Poller,

    records: Arc<Vec<LogRecord>>,
    summary: SummaryCache,
    error: Option<String>,
    last_applied_seq: u64,
    last_updated: Option<DateTime<Local>>,

    // UI state
    pub scroll_offset: usize,
}

impl DashboardState {
    /// New state with the first (unfiltered) fetch due at `now`.
    pub fn new(polling: &PollingConfig, now: Instant) -> Self {
        let mut poller = Poller::new(polling.interval());
        poller.restart("", now);

        let records = Arc::new(Vec::new());
        let mut summary = SummaryCache::new();
        summary.refresh(&records);

        Self {
            search: Debouncer::new(polling.debounce()),
            poller,
            records,
            summary,
            error: None,
            last_applied_seq: 0,
            last_updated: None,
            scroll_offset: 0,
        }
    }

    pub fn search_input(&self) -> &str {
        self.search.raw()
    }

    pub fn committed_term(&self) -> &str {
        self.search.committed()
    }

    pub fn records(&self) -> &Arc<Vec<LogRecord>> {
        &self.records
    }

    pub fn summary(&self) -> &SummaryTables {
        self.summary.tables()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn set_search(&mut self, term: impl Into<String>, now: Instant) {
        self.search.set_raw(term, now);
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut term = self.search.raw().to_string();
        term.push(c);
        self.search.set_raw(term, now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        let mut term = self.search.raw().to_string();
        if term.pop().is_some() {
            self.search.set_raw(term, now);
        }
    }

    pub fn clear_search(&mut self, now: Instant) {
        self.search.set_raw(String::new(), now);
    }

    /// Advance both timers to `now` and return the fetches to issue.
    pub fn tick(&mut self, now: Instant) -> Vec<FetchRequest> {
        if let Some(term) = self.search.poll(now) {
            info!(term = %term, "search term committed");
            let term = term.to_string();
            self.poller.restart(term, now);
            self.scroll_offset = 0;
        }

        self.poller.poll(now).into_iter().collect()
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.search.next_deadline(), self.poller.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply a fetch outcome unless a newer request has already been applied
    /// or the committed term has moved on since it was issued.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let FetchOutcome { request, result } = outcome;

        if request.generation != self.poller.generation() || request.seq <= self.last_applied_seq {
            debug!(
                seq = request.seq,
                generation = request.generation,
                term = %request.term,
                "discarding stale fetch outcome"
            );
            return Applied::Stale;
        }
        self.last_applied_seq = request.seq;

        match result {
            Ok(records) => {
                debug!(seq = request.seq, count = records.len(), "logs refreshed");
                self.records = Arc::new(records);
                self.scroll_offset = self.scroll_offset.min(self.records.len().saturating_sub(1));
                self.summary.refresh(&self.records);
                self.error = None;
                self.last_updated = Some(Local::now());
                Applied::Records
            }
            Err(e) => {
                warn!(seq = request.seq, term = %request.term, "Error fetching logs: {}", e);
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                Applied::Failure
            }
        }
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let max = self.records.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + rows).min(max);
    }

    pub fn scroll_home(&mut self) {
        self.scroll_offset = 0;
    }

    /// Release both timers.
    pub fn shutdown(&mut self) {
        self.search.cancel();
        self.poller.stop();
    }
}
