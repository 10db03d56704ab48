// services/log-dash/src/aggregate.rs
//
// Summary tables for the sentiment and service charts
//

use std::collections::BTreeMap;
use std::sync::Arc;

use svckit::LogRecord;

/// One bar in a summary chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub name: String,
    pub count: u64,
}

impl LabelCount {
    fn new(name: &str, count: u64) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTables {
    pub sentiment: Vec<LabelCount>,
    pub services: Vec<LabelCount>,
}

/// Count records per sentiment label, ordered by label.
pub fn sentiment_summary(records: &[LogRecord]) -> Vec<LabelCount> {
    count_by(records, LogRecord::sentiment_label)
        .into_iter()
        .map(|(name, count)| LabelCount::new(name, count))
        .collect()
}

/// Count records per service, most frequent first. Ties go alphabetical.
pub fn service_summary(records: &[LogRecord]) -> Vec<LabelCount> {
    let mut services: Vec<LabelCount> = count_by(records, LogRecord::service_name)
        .into_iter()
        .map(|(name, count)| LabelCount::new(name, count))
        .collect();

    // BTreeMap already yields names in order, a stable sort keeps it for ties
    services.sort_by(|a, b| b.count.cmp(&a.count));
    services
}

pub fn summarize(records: &[LogRecord]) -> SummaryTables {
    SummaryTables {
        sentiment: sentiment_summary(records),
        services: service_summary(records),
    }
}

fn count_by<'a, F>(records: &'a [LogRecord], key: F) -> BTreeMap<&'a str, u64>
where
    F: Fn(&'a LogRecord) -> &'a str,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Memoizes `summarize` on the identity of the record list.
#[derive(Debug, Default)]
pub struct SummaryCache {
    source: Option<Arc<Vec<LogRecord>>>,
    tables: SummaryTables,
    #[cfg(test)]
    recomputations: u64,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute only when `records` is a different list than last time.
    pub fn refresh(&mut self, records: &Arc<Vec<LogRecord>>) -> &SummaryTables {
        let unchanged = self
            .source
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, records));

        if !unchanged {
            self.tables = summarize(records);
            self.source = Some(Arc::clone(records));
            #[cfg(test)]
            {
                self.recomputations += 1;
            }
        }
        &self.tables
    }

    pub fn tables(&self) -> &SummaryTables {
        &self.tables
    }

    #[cfg(test)]
    fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
