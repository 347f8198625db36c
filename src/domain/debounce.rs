#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix millisecond timestamps.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Identifies one arming of a [`Debouncer`]. A token from an earlier arming
/// never fires once the timer has been re-armed or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// A single cancellable deadline. Re-arming replaces the previous deadline.
#[derive(Debug)]
pub struct Debouncer {
    delay_ms: i64,
    deadline: Option<(TimerToken, i64)>,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: delay_ms as i64,
            deadline: None,
            generation: 0,
        }
    }

    pub fn arm(&mut self, now: i64) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.deadline = Some((token, now + self.delay_ms));
        token
    }

    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.deadline.take().map(|(token, _)| token)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<i64> {
        self.deadline.map(|(_, at)| at)
    }

    /// Disarms and returns the token if the deadline has passed.
    pub fn fire_if_due(&mut self, now: i64) -> Option<TimerToken> {
        match self.deadline {
            Some((token, at)) if now >= at => {
                self.deadline = None;
                Some(token)
            }
            _ => None,
        }
    }

    /// Milliseconds until the deadline, `None` when idle.
    pub fn remaining_ms(&self, now: i64) -> Option<u64> {
        self.deadline().map(|at| (at - now).max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_after_delay() {
        let mut timer = Debouncer::new(400);
        let token = timer.arm(1000);

        assert_eq!(timer.fire_if_due(1399), None);
        assert_eq!(timer.fire_if_due(1400), Some(token));
        assert!(!timer.is_armed());
        assert_eq!(timer.fire_if_due(2000), None);
    }

    #[test]
    fn test_rearm_pushes_deadline_and_replaces_token() {
        let mut timer = Debouncer::new(400);
        let first = timer.arm(1000);
        let second = timer.arm(1300);

        assert_ne!(first, second);
        assert_eq!(timer.fire_if_due(1400), None);
        assert_eq!(timer.fire_if_due(1700), Some(second));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut timer = Debouncer::new(400);
        let token = timer.arm(0);
        assert_eq!(timer.cancel(), Some(token));
        assert_eq!(timer.fire_if_due(10_000), None);
        assert_eq!(timer.cancel(), None);
    }

    #[test]
    fn test_remaining_ms() {
        let mut timer = Debouncer::new(400);
        assert_eq!(timer.remaining_ms(0), None);
        timer.arm(100);
        assert_eq!(timer.remaining_ms(300), Some(200));
        assert_eq!(timer.remaining_ms(900), Some(0));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(10);
        let other = clock.clone();
        clock.advance(5);
        assert_eq!(other.now_ms(), 15);
        other.set(100);
        assert_eq!(clock.now_ms(), 100);
    }
}
