// services/log-dash/src/poller.rs
//
// Poll cadence for the committed search term
//

use std::time::{Duration, Instant};

/// A fetch the poller wants issued.
///
/// `generation` changes with every committed term, `seq` with every request.
/// Outcomes carry their request back so stale replies can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub generation: u64,
    pub term: String,
}

#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    term: String,
    generation: u64,
    next_seq: u64,
    next_due: Option<Instant>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            term: String::new(),
            generation: 0,
            next_seq: 1,
            next_due: None,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Replace the cadence with a new one for `term`, due immediately.
    pub fn restart(&mut self, term: impl Into<String>, now: Instant) {
        self.term = term.into();
        self.generation += 1;
        self.next_due = Some(now);
    }

    /// Issue a request if one is due.
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        let due = self.next_due.filter(|due| *due <= now)?;

        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);

        let request = FetchRequest {
            seq: self.next_seq,
            generation: self.generation,
            term: self.term.clone(),
        };
        self.next_seq += 1;
        Some(request)
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(3_000);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drive the poller every 10ms and collect what it issues.
    fn run(poller: &mut Poller, from: Instant, until_ms: u64) -> Vec<(u64, FetchRequest)> {
        let mut issued = Vec::new();
        let mut t = 0;
        while t <= until_ms {
            if let Some(request) = poller.poll(from + ms(t)) {
                issued.push((t, request));
            }
            t += 10;
        }
        issued
    }

    #[test]
    fn test_idle_until_started() {
        let mut poller = Poller::new(INTERVAL);
        assert!(poller.poll(Instant::now()).is_none());
        assert!(!poller.is_running());
    }

    #[test]
    fn test_immediate_fetch_then_fixed_cadence() {
        let start = Instant::now();
        let mut poller = Poller::new(INTERVAL);
        poller.restart("payment", start);

        let issued = run(&mut poller, start, 9_500);
        let times: Vec<u64> = issued.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0, 3_000, 6_000, 9_000]);
        assert!(issued.iter().all(|(_, r)| r.term == "payment" && r.generation == 1));

        let seqs: Vec<u64> = issued.iter().map(|(_, r)| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_restart_replaces_cadence() {
        let start = Instant::now();
        let mut poller = Poller::new(INTERVAL);
        poller.restart("pay", start);
        assert_eq!(poller.poll(start).map(|r| r.term), Some("pay".to_string()));

        poller.restart("payment", start + ms(1_000));
        let request = poller.poll(start + ms(1_000)).unwrap();
        assert_eq!(request.term, "payment");
        assert_eq!(request.generation, 2);

        // Old cadence would have fired at 3000; the new one fires at 4000
        assert!(poller.poll(start + ms(3_000)).is_none());
        assert_eq!(poller.poll(start + ms(4_000)).map(|r| r.term), Some("payment".to_string()));
    }

    #[test]
    fn test_late_tick_does_not_burst() {
        let start = Instant::now();
        let mut poller = Poller::new(INTERVAL);
        poller.restart("", start);
        poller.poll(start);

        // Loop stalled for over two intervals
        assert!(poller.poll(start + ms(7_000)).is_some());
        assert!(poller.poll(start + ms(7_000)).is_none());
        assert_eq!(poller.next_due(), Some(start + ms(10_000)));
    }

    #[test]
    fn test_stop_cancels_cadence() {
        let start = Instant::now();
        let mut poller = Poller::new(INTERVAL);
        poller.restart("x", start);
        poller.stop();
        assert!(poller.poll(start + ms(10_000)).is_none());
    }
}
