//! Leading-edge throttling.
//!
//! The first call in an idle period runs immediately; every further call
//! within `interval` of it is dropped. There is no trailing call: a burst
//! of scroll events produces exactly one tick, at its start.
//!
//! Time is supplied by the caller in milliseconds (an event's
//! `timeStamp`, `performance.now()`), which keeps the wrapper deterministic
//! under test.

use std::time::Duration;

/// The suppression window shared by every call through one wrapper.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_nanos() as f64 / 1_000_000.0,
            window_start: None,
        }
    }

    /// Whether a call at `now_ms` may run. An admitted call opens a new
    /// suppression window.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.window_start {
            Some(start) if now_ms - start < self.interval_ms => false,
            _ => {
                self.window_start = Some(now_ms);
                true
            }
        }
    }
}

/// A callback wrapped in a [`Throttle`].
pub struct Throttled<F> {
    throttle: Throttle,
    callback: F,
}

/// Wrap `callback` so it runs at most once per `interval`.
///
/// ```
/// use folio_ui::throttle::throttle;
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let mut tick = throttle(Duration::from_millis(16), |n: u32| calls += n);
/// assert_eq!(tick.call(0.0, 1), Some(()));
/// assert_eq!(tick.call(10.0, 1), None);
/// assert_eq!(tick.call(16.0, 1), Some(()));
/// drop(tick);
/// assert_eq!(calls, 2);
/// ```
pub fn throttle<F>(interval: Duration, callback: F) -> Throttled<F> {
    Throttled {
        throttle: Throttle::new(interval),
        callback,
    }
}

impl<F> Throttled<F> {
    /// Run the callback with `arg` unless a previous call within the
    /// interval already ran. Returns the callback's result when it ran.
    pub fn call<A, R>(&mut self, now_ms: f64, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.throttle.admit(now_ms) {
            Some((self.callback)(arg))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_runs_synchronously() {
        let mut ran = Vec::new();
        let mut wrapped = throttle(Duration::from_millis(100), |n: i32| ran.push(n));
        wrapped.call(5.0, 1);
        drop(wrapped);
        assert_eq!(ran, vec![1]);
    }

    #[test]
    fn burst_within_window_runs_once() {
        let mut count = 0;
        let mut wrapped = throttle(Duration::from_millis(100), |_: ()| count += 1);
        for t in 0..100 {
            wrapped.call(t as f64, ());
        }
        drop(wrapped);
        assert_eq!(count, 1);
    }

    #[test]
    fn suppressed_calls_are_not_replayed() {
        let mut seen = Vec::new();
        let mut wrapped = throttle(Duration::from_millis(100), |n: i32| seen.push(n));
        wrapped.call(0.0, 1);
        wrapped.call(50.0, 2);
        wrapped.call(99.0, 3);
        // Window expired; the dropped 2 and 3 never run.
        wrapped.call(150.0, 4);
        drop(wrapped);
        assert_eq!(seen, vec![1, 4]);
    }

    #[test]
    fn window_restarts_from_admitted_call() {
        let mut gate = Throttle::new(Duration::from_millis(16));
        assert!(gate.admit(0.0));
        assert!(!gate.admit(15.9));
        assert!(gate.admit(16.0));
        assert!(!gate.admit(31.0));
        assert!(gate.admit(32.0));
    }

    #[test]
    fn returns_callback_result() {
        let mut wrapped = throttle(Duration::from_millis(10), |n: i32| n * 2);
        assert_eq!(wrapped.call(0.0, 21), Some(42));
        assert_eq!(wrapped.call(1.0, 21), None);
    }
}
