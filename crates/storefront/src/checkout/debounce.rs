//! Single-slot debounce timer.
//!
//! One pending action at most: every new input cancels the previous timer
//! and re-arms it, so only the last keystroke within the window fires. The
//! clock is passed in by the caller, which keeps the component pure and lets
//! tests drive time explicitly.

use std::time::{Duration, Instant};

/// A cancel-and-rearm timer holding at most one pending value.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    value: String,
    due: Instant,
}

impl Debouncer {
    /// Create a debouncer with the given quiet-period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm (or re-arm) the timer with a new value. Any previously pending
    /// value is discarded.
    pub fn press(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            value: value.into(),
            due: now + self.delay,
        });
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the pending value if its quiet-period has elapsed.
    ///
    /// Returns `None` while the timer is still running or nothing is armed.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// True while a value is waiting for its quiet-period.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_only_after_quiet_period() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.press("Київ", t0);

        assert_eq!(debouncer.fire(t0), None);
        assert_eq!(debouncer.fire(t0 + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.fire(t0 + Duration::from_millis(300)),
            Some("Київ".to_string())
        );
    }

    #[test]
    fn test_fire_consumes_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.press("Київ", t0);
        assert!(debouncer.fire(t0 + DELAY).is_some());
        assert!(!debouncer.is_armed());
        assert_eq!(debouncer.fire(t0 + DELAY * 2), None);
    }

    #[test]
    fn test_rearm_resets_the_window() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.press("Ки", t0);
        debouncer.press("Киї", t0 + Duration::from_millis(200));

        // The first value's deadline has passed, but it was superseded.
        assert_eq!(debouncer.fire(t0 + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.fire(t0 + Duration::from_millis(500)),
            Some("Киї".to_string())
        );
    }

    #[test]
    fn test_cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.press("Київ", t0);
        debouncer.cancel();

        assert!(!debouncer.is_armed());
        assert_eq!(debouncer.fire(t0 + DELAY), None);
    }

    #[test]
    fn test_deadline_tracks_last_press() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        assert!(debouncer.deadline().is_none());
        debouncer.press("a", t0);
        assert_eq!(debouncer.deadline(), Some(t0 + DELAY));
    }
}
