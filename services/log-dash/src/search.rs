// services/log-dash/src/search.rs
//
// Search term debouncing
//

use std::time::{Duration, Instant};

/// Holds the term as typed (`raw`) and the term fetches use (`committed`).
///
/// `committed` only advances once `raw` has been stable for the full quiet
/// period. The pending deadline is the debounce timer: replacing it cancels
/// the previous one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    raw: String,
    committed: String,
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            raw: String::new(),
            committed: String::new(),
            quiet_period,
            deadline: None,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Update the typed term and restart the quiet period if it changed.
    pub fn set_raw(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        if term == self.raw {
            return;
        }
        self.raw = term;
        self.deadline = Some(now + self.quiet_period);
    }

    /// Commit `raw` once the quiet period has elapsed.
    ///
    /// Returns the new committed term, or `None` if nothing is due or the
    /// term settled back to the value already committed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                if self.raw == self.committed {
                    return None;
                }
                self.committed = self.raw.clone();
                Some(&self.committed)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_commits_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.set_raw("pay", start);
        assert_eq!(debouncer.raw(), "pay");
        assert_eq!(debouncer.poll(start + ms(299)), None);
        assert_eq!(debouncer.committed(), "");

        assert_eq!(debouncer.poll(start + ms(300)), Some("pay"));
        assert_eq!(debouncer.committed(), "pay");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_burst_commits_once_after_last_keystroke() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        let mut commits = Vec::new();

        let mut term = String::new();
        for (i, c) in "payment".chars().enumerate() {
            let at = start + ms(i as u64 * 100);
            if let Some(committed) = debouncer.poll(at) {
                commits.push(committed.to_string());
            }
            term.push(c);
            debouncer.set_raw(term.clone(), at);
        }

        let last = start + ms(600);
        for step in 1..=10 {
            if let Some(committed) = debouncer.poll(last + ms(step * 50)) {
                commits.push(committed.to_string());
            }
        }

        assert_eq!(commits, vec!["payment".to_string()]);
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn test_deadline_moves_with_each_keystroke() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.set_raw("a", start);
        debouncer.set_raw("ab", start + ms(200));
        assert_eq!(debouncer.next_deadline(), Some(start + ms(500)));
        assert_eq!(debouncer.poll(start + ms(300)), None);
        assert_eq!(debouncer.poll(start + ms(500)), Some("ab"));
    }

    #[test]
    fn test_typing_then_deleting_to_empty_settles_without_change() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.set_raw("er", start);
        debouncer.set_raw("e", start + ms(50));
        debouncer.set_raw("", start + ms(100));

        assert_eq!(debouncer.poll(start + ms(400)), None);
        assert_eq!(debouncer.committed(), "");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_clearing_committed_term_commits_empty() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.set_raw("error", start);
        assert_eq!(debouncer.poll(start + ms(300)), Some("error"));

        debouncer.set_raw("", start + ms(1_000));
        assert_eq!(debouncer.poll(start + ms(1_300)), Some(""));
    }

    #[test]
    fn test_unchanged_input_does_not_restart_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.set_raw("x", start);
        debouncer.set_raw("x", start + ms(200));
        assert_eq!(debouncer.next_deadline(), Some(start + ms(300)));
    }

    #[test]
    fn test_cancel_drops_pending_commit() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.set_raw("late", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + ms(1_000)), None);
        assert_eq!(debouncer.committed(), "");
    }
}
