//! Simulated clock with one-shot and repeating timers.
//!
//! Mirrors the browser's `setTimeout`/`setInterval` contract on a virtual
//! clock so widget behavior that depends on time can be replayed
//! deterministically: timers fire in due order, ties fire in scheduling
//! order, and a cancelled timer never fires.

use std::time::Duration;

/// Identifier of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    due: Duration,
    /// Insertion order, bumped on every re-arm of a repeating timer.
    seq: u64,
    period: Option<Duration>,
    payload: T,
}

/// A single-threaded timer queue over simulated time.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T: Clone> Timeline<T> {
    /// Create an empty timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still armed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether the given timer is still armed.
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Fire `payload` once, `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        self.push(delay, None, payload)
    }

    /// Fire `payload` every `period`, first time one period from now.
    ///
    /// A zero period is bumped to one millisecond so the clock always moves.
    pub fn schedule_every(&mut self, period: Duration, payload: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), payload)
    }

    /// Disarm a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Pop the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the timer's due time. Repeating timers are re-armed
    /// one period later before the payload is returned.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<(TimerId, T)> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;

        let fired = self.pending.remove(position);
        self.now = self.now.max(fired.due);

        if let Some(period) = fired.period {
            let seq = self.bump_seq();
            self.pending.push(Pending {
                id: fired.id,
                due: fired.due + period,
                seq,
                period: Some(period),
                payload: fired.payload.clone(),
            });
        }

        Some((fired.id, fired.payload))
    }

    /// Move the clock forward to `deadline` without firing anything.
    ///
    /// Call after draining [`Timeline::fire_next`] for that deadline.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            seq,
            period,
            payload,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(timeline: &mut Timeline<&'static str>, until: Duration) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some((_, payload)) = timeline.fire_next(until) {
            fired.push((timeline.now().as_millis() as u64, payload));
        }
        timeline.advance_to(until);
        fired
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(100), "a");

        assert!(drain(&mut timeline, ms(99)).is_empty());
        assert_eq!(drain(&mut timeline, ms(100)), vec![(100, "a")]);
        assert!(drain(&mut timeline, ms(1000)).is_empty());
        assert_eq!(timeline.pending(), 0);
    }

    #[test]
    fn test_due_order_then_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(50), "late");
        timeline.schedule(ms(10), "first");
        timeline.schedule(ms(10), "second");

        let fired = drain(&mut timeline, ms(100));
        assert_eq!(fired, vec![(10, "first"), (10, "second"), (50, "late")]);
    }

    #[test]
    fn test_repeating_timer() {
        let mut timeline = Timeline::new();
        let id = timeline.schedule_every(ms(40), "tick");

        let fired = drain(&mut timeline, ms(130));
        assert_eq!(fired, vec![(40, "tick"), (80, "tick"), (120, "tick")]);
        assert!(timeline.is_armed(id));
        assert_eq!(timeline.now(), ms(130));
    }

    #[test]
    fn test_cancel() {
        let mut timeline = Timeline::new();
        let id = timeline.schedule(ms(10), "never");
        assert!(timeline.cancel(id));
        assert!(!timeline.cancel(id));
        assert!(drain(&mut timeline, ms(100)).is_empty());
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut timeline = Timeline::new();
        timeline.advance_to(ms(500));
        timeline.schedule(ms(20), "x");
        assert!(timeline.fire_next(ms(519)).is_none());
        let (_, payload) = timeline.fire_next(ms(520)).unwrap();
        assert_eq!(payload, "x");
        assert_eq!(timeline.now(), ms(520));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut timeline: Timeline<&str> = Timeline::new();
        timeline.advance_to(ms(300));
        timeline.advance_to(ms(100));
        assert_eq!(timeline.now(), ms(300));
    }
}
