use crate::{SessionResult, Timestamp};

/// Handles mistake counting and timing for one session
#[derive(Debug, Clone, Default)]
pub struct StatisticsTracker {
    mistakes: usize,
    started_at: Option<Timestamp>,
    result: Option<SessionResult>,
}

impl StatisticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total mistakes so far. Never decreases.
    pub const fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn record_mistakes(&mut self, count: usize) {
        self.mistakes += count;
    }

    /// Start timing, unless already started
    pub fn start(&mut self, now: Timestamp) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Check if timing has started
    pub const fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub const fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    /// Get elapsed milliseconds since start, frozen at completion
    pub fn elapsed(&self, now: Timestamp) -> Option<u64> {
        let end = self.result.map_or(now, |result| result.end_time);
        self.started_at.map(|start| end.saturating_sub(start))
    }

    /// Mark the session as completed and score it
    ///
    /// Only the first call scores; later calls return the stored result.
    pub fn mark_completed(&mut self, now: Timestamp, typed_len: usize) -> SessionResult {
        *self.result.get_or_insert_with(|| {
            SessionResult::calculate(self.started_at, now, self.mistakes, typed_len)
        })
    }

    /// Check if the session has been completed
    pub const fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub const fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_tracker() {
        let mut tracker = StatisticsTracker::new();

        // Initially nothing recorded
        assert_eq!(tracker.mistakes(), 0);
        assert!(!tracker.has_started());
        assert_eq!(tracker.elapsed(1_000), None);

        tracker.start(1_000);
        tracker.start(2_000);
        assert_eq!(tracker.started_at(), Some(1_000));

        tracker.record_mistakes(2);
        tracker.record_mistakes(0);
        assert_eq!(tracker.mistakes(), 2);
        assert_eq!(tracker.elapsed(4_000), Some(3_000));
    }

    #[test]
    fn test_completion_is_scored_once() {
        let mut tracker = StatisticsTracker::new();
        tracker.start(0);
        tracker.record_mistakes(1);

        let first = tracker.mark_completed(600_000, 2);
        assert!(tracker.is_completed());
        assert_eq!(first.accuracy, 50);

        let second = tracker.mark_completed(900_000, 2);
        assert_eq!(first, second);
        assert_eq!(tracker.elapsed(1_000_000), Some(600_000));
    }
}
