//! Sliding-window event rate limiter
//!
//! Tracks the timestamps of admitted events and answers whether one more event
//! would keep the number of events within the trailing interval at or below
//! the configured maximum.
//!
//! # Window Semantics
//!
//! For an event at `t`, the window is `(t - interval, t]`: an event recorded
//! exactly `interval` before `t` has already aged out. Timestamps are kept
//! oldest first in a `VecDeque`, evicted from the front and appended at the
//! back, so each operation costs O(evicted) plus O(1) amortized per admission.
//!
//! # Degenerate Configurations
//!
//! - `max_events = 0` never admits anything, whatever the interval.
//! - `interval = 0` admits every event (as long as `max_events > 0`), since
//!   every recorded event lies outside a zero-width window.

use crate::types::{AuthorizerError, Timestamp};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;

/// Exact sliding-window rate limiter over event timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindow {
    max_events: usize,
    interval: TimeDelta,
    events: VecDeque<Timestamp>,
}

impl SlidingWindow {
    /// Create an empty window admitting at most `max_events` per `interval`
    ///
    /// A negative interval is treated as zero.
    pub fn new(max_events: usize, interval: TimeDelta) -> Self {
        SlidingWindow {
            max_events,
            interval: interval.max(TimeDelta::zero()),
            events: VecDeque::with_capacity(max_events.min(16)),
        }
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }

    /// Number of recorded events, including ones not yet evicted
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent recorded event
    pub fn newest(&self) -> Option<Timestamp> {
        self.events.back().copied()
    }

    /// Whether every recorded event has aged out of the window ending at `at`
    pub fn is_expired(&self, at: Timestamp) -> bool {
        match self.newest() {
            Some(newest) => newest <= self.threshold(at),
            None => true,
        }
    }

    /// Whether one more event at `at` would fit in the window
    ///
    /// Pure query: repeated calls without an intervening [`take`](Self::take)
    /// always give the same answer, and `take(at)` agrees with it.
    pub fn allow(&self, at: Timestamp) -> bool {
        let threshold = self.threshold(at);
        let recent = self
            .events
            .iter()
            .rev()
            .take_while(|&&event| event > threshold)
            .count();
        recent < self.max_events
    }

    /// Fail if `at` precedes the newest recorded event
    ///
    /// Equal timestamps are in order.
    pub fn check_order(&self, at: Timestamp) -> Result<(), AuthorizerError> {
        match self.newest() {
            Some(newest) if at < newest => Err(AuthorizerError::out_of_order(at, newest)),
            _ => Ok(()),
        }
    }

    /// Record an event at `at` if it fits in the window
    ///
    /// Evicts aged-out events first. Returns `Ok(false)` without recording when
    /// the window is full, and a fatal error when `at` is out of order.
    pub fn take(&mut self, at: Timestamp) -> Result<bool, AuthorizerError> {
        self.check_order(at)?;

        let threshold = self.threshold(at);
        while self.events.front().is_some_and(|&event| event <= threshold) {
            self.events.pop_front();
        }

        if self.events.len() >= self.max_events {
            return Ok(false);
        }
        self.events.push_back(at);
        Ok(true)
    }

    fn threshold(&self, at: Timestamp) -> Timestamp {
        at.checked_sub_signed(self.interval)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2021, 4, 1, 12, 26, 47).unwrap()
    }

    fn secs(n: i64) -> TimeDelta {
        TimeDelta::seconds(n)
    }

    /// Take an event, asserting `allow` predicted the outcome
    fn take(window: &mut SlidingWindow, at: Timestamp) -> bool {
        let allowed = window.allow(at);
        let taken = window.take(at).unwrap();
        assert_eq!(allowed, taken, "allow and take disagree at {at}");
        taken
    }

    #[test]
    fn test_allow_does_not_affect_state() {
        let window = SlidingWindow::new(5, secs(1));
        for _ in 0..100 {
            assert!(window.allow(start()));
        }
        assert!(window.is_empty());
    }

    #[test]
    fn test_allow_is_idempotent_on_full_window() {
        let mut window = SlidingWindow::new(1, secs(60));
        assert!(take(&mut window, start()));

        let before = window.clone();
        for _ in 0..10 {
            assert!(!window.allow(start() + secs(1)));
        }
        assert_eq!(window, before);
        assert!(take(&mut window, start() + secs(60)));
    }

    #[test]
    fn test_window_capacity() {
        let mut window = SlidingWindow::new(3, TimeDelta::minutes(2));

        assert!(take(&mut window, start()));
        assert!(take(&mut window, start() + secs(1)));
        assert!(take(&mut window, start() + secs(2)));
        assert!(!take(&mut window, start() + secs(3)));
        assert!(take(&mut window, start() + TimeDelta::minutes(2) + secs(1)));
    }

    #[test]
    fn test_periodic_events_at_minimum_period() {
        let mut window = SlidingWindow::new(5, secs(1));
        let period = TimeDelta::milliseconds(200);

        let mut now = start();
        for _ in 0..50 {
            now += period;
            assert!(take(&mut window, now));
        }
    }

    #[test]
    fn test_periodic_events_slightly_too_fast() {
        let mut window = SlidingWindow::new(5, secs(1));
        let period = TimeDelta::milliseconds(199);

        let mut now = start();
        for _ in 0..5 {
            now += period;
            assert!(take(&mut window, now));
        }
        assert!(!take(&mut window, now));
    }

    #[test]
    fn test_burst_at_start_of_interval() {
        let mut window = SlidingWindow::new(5, secs(1));
        for _ in 0..5 {
            assert!(take(&mut window, start()));
        }

        assert!(!take(&mut window, start() + TimeDelta::milliseconds(500)));
        assert!(!take(&mut window, start() + TimeDelta::milliseconds(999)));
        assert!(!take(&mut window, start() + TimeDelta::nanoseconds(999_999_999)));
        assert!(take(&mut window, start() + secs(1)));
    }

    #[test]
    fn test_burst_at_end_of_interval() {
        let mut window = SlidingWindow::new(5, secs(1));
        assert!(take(&mut window, start()));

        let late = start() + TimeDelta::nanoseconds(999_999_999);
        for _ in 1..5 {
            assert!(take(&mut window, late));
        }
        assert!(!take(&mut window, late));

        // first event expires exactly one interval later
        let now = start() + secs(1);
        assert!(take(&mut window, now));
        assert!(!take(&mut window, now + TimeDelta::milliseconds(500)));
        assert!(take(&mut window, now + TimeDelta::nanoseconds(999_999_999)));
    }

    #[rstest]
    #[case::zero_max_events(0, secs(1), 0)]
    #[case::zero_everything(0, TimeDelta::zero(), 0)]
    #[case::zero_interval(5, TimeDelta::zero(), 10)]
    #[case::negative_interval(5, secs(-1), 10)]
    fn test_degenerate_configurations(
        #[case] max_events: usize,
        #[case] interval: TimeDelta,
        #[case] expected_admitted: usize,
    ) {
        let mut window = SlidingWindow::new(max_events, interval);
        let admitted = (0..10).filter(|_| take(&mut window, start())).count();
        assert_eq!(admitted, expected_admitted);
    }

    #[test]
    fn test_out_of_order_take_is_fatal() {
        let mut window = SlidingWindow::new(3, secs(60));
        assert!(take(&mut window, start()));

        let result = window.take(start() - secs(1));
        assert!(matches!(result, Err(AuthorizerError::OutOfOrder { .. })));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_equal_timestamps_are_in_order() {
        let mut window = SlidingWindow::new(3, secs(60));
        assert!(take(&mut window, start()));
        assert!(window.check_order(start()).is_ok());
        assert!(window.check_order(start() - secs(1)).is_err());
    }

    #[test]
    fn test_take_evicts_aged_out_events() {
        let mut window = SlidingWindow::new(3, secs(60));
        assert!(take(&mut window, start()));
        assert!(take(&mut window, start() + secs(30)));
        assert!(take(&mut window, start() + secs(80)));

        assert_eq!(window.len(), 2);
        assert_eq!(window.newest(), Some(start() + secs(80)));
    }

    #[test]
    fn test_is_expired() {
        let mut window = SlidingWindow::new(2, secs(60));
        assert!(window.is_expired(start()));

        assert!(take(&mut window, start()));
        assert!(take(&mut window, start() + secs(30)));

        assert!(!window.is_expired(start() + secs(60)));
        assert!(!window.is_expired(start() + secs(89)));
        assert!(window.is_expired(start() + secs(90)));
    }
}
