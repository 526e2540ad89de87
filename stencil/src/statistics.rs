//! # Statistics Module - Session Results
//!
//! A session is scored exactly once, when the last reference character is entered. The report
//! only counts typed characters: auto-filled scaffolding is never "work" for speed or accuracy.

use crate::{AVERAGE_WORD_LENGTH, Timestamp, minutes};

/// The final report of a completed session
///
/// All percentages and speeds are rounded to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionResult {
    /// Words per minute, five typed characters to a word
    pub wpm: u32,
    /// Percentage between 0 and 100
    pub accuracy: u32,
    /// Always 100 for a completed session
    pub progress: u32,
    /// Total miskeys made during the session, corrected or not
    pub mistakes: usize,
    /// When the first character was entered, if ever
    pub start_time: Option<Timestamp>,
    pub end_time: Timestamp,
}

impl SessionResult {
    /// Score a session
    ///
    /// * `start_time` - When the first character was entered. `None` counts as `end_time`.
    /// * `end_time` - When the session completed
    /// * `mistakes` - Total mistakes made
    /// * `typed_len` - Number of characters the user had to type by hand
    ///
    /// ```rust
    /// use stencil::SessionResult;
    ///
    /// // Two typed characters over ten minutes with one mistake
    /// let result = SessionResult::calculate(Some(0), 600_000, 1, 2);
    /// assert_eq!(result.wpm, 0);
    /// assert_eq!(result.accuracy, 50);
    /// assert_eq!(result.progress, 100);
    /// ```
    pub fn calculate(
        start_time: Option<Timestamp>,
        end_time: Timestamp,
        mistakes: usize,
        typed_len: usize,
    ) -> Self {
        let start = start_time.unwrap_or(end_time);
        let elapsed = minutes(end_time.saturating_sub(start));

        let wpm = if elapsed > 0.0 {
            (typed_len as f64 / AVERAGE_WORD_LENGTH as f64) / elapsed
        } else {
            0.0
        };

        // Retrying the same wrong key can push mistakes past the typed length
        let accuracy = if typed_len > 0 {
            (100.0 - (mistakes as f64 / typed_len as f64) * 100.0).max(0.0)
        } else {
            100.0
        };

        Self {
            wpm: round(wpm),
            accuracy: round(accuracy),
            progress: 100,
            mistakes,
            start_time,
            end_time,
        }
    }

    /// Milliseconds between the first keystroke and completion
    pub const fn elapsed_millis(&self) -> u64 {
        match self.start_time {
            Some(start) => self.end_time.saturating_sub(start),
            None => 0,
        }
    }
}

/// Progress of a session that may still be running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiveStats {
    /// Percentage of the reference entered so far, 0 - 100
    pub progress: u32,
    pub mistakes: usize,
}

impl LiveStats {
    /// * `input_len` - Characters entered, auto-filled ones included
    /// * `text_len` - Length of the reference
    /// * `mistakes` - Mistakes made so far
    pub fn calculate(input_len: usize, text_len: usize, mistakes: usize) -> Self {
        let progress = input_len as f64 / text_len.max(1) as f64 * 100.0;

        Self {
            progress: round(progress),
            mistakes,
        }
    }
}

// Values are never negative here, so the saturating cast only guards against huge speeds
fn round(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_basic() {
        // 50 typed characters = 10 words in one minute
        let result = SessionResult::calculate(Some(1_000), 61_000, 0, 50);
        assert_eq!(result.wpm, 10);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.progress, 100);
        assert_eq!(result.elapsed_millis(), 60_000);
    }

    #[test]
    fn test_result_with_one_mistake() {
        let result = SessionResult::calculate(Some(0), 600_000, 1, 2);
        assert_eq!(result.wpm, 0);
        assert_eq!(result.accuracy, 50);
        assert_eq!(result.mistakes, 1);
        assert_eq!(result.start_time, Some(0));
        assert_eq!(result.end_time, 600_000);
    }

    #[test]
    fn test_result_zero_elapsed() {
        let result = SessionResult::calculate(Some(5_000), 5_000, 0, 10);
        assert_eq!(result.wpm, 0);

        let unstarted = SessionResult::calculate(None, 5_000, 0, 0);
        assert_eq!(unstarted.wpm, 0);
        assert_eq!(unstarted.accuracy, 100);
        assert_eq!(unstarted.elapsed_millis(), 0);
    }

    #[test]
    fn test_accuracy_never_negative() {
        let result = SessionResult::calculate(Some(0), 60_000, 7, 3);
        assert_eq!(result.accuracy, 0);
    }

    #[test]
    fn test_accuracy_rounding() {
        // 100 - 1/3 * 100 = 66.67
        assert_eq!(SessionResult::calculate(Some(0), 1, 1, 3).accuracy, 67);
        // 100 - 1/8 * 100 = 87.5, rounds up
        assert_eq!(SessionResult::calculate(Some(0), 1, 1, 8).accuracy, 88);
    }

    #[test]
    fn test_live_stats() {
        assert_eq!(LiveStats::calculate(0, 0, 0).progress, 0);
        assert_eq!(LiveStats::calculate(1, 3, 2).progress, 33);
        assert_eq!(LiveStats::calculate(2, 3, 2).progress, 67);
        assert_eq!(LiveStats::calculate(3, 3, 2).mistakes, 2);
        assert_eq!(LiveStats::calculate(3, 3, 0).progress, 100);
    }
}
