//! Drive a [`CardDeck`] on a simulated [`Timeline`].
//!
//! Plays the role the browser shell plays at runtime: it arms and cancels the
//! deck's autoplay, settle and restart timers and feeds their expiry back into
//! the deck. Used for the native preview and for testing time-based behavior.

use std::time::Duration;

use super::{CardDeck, DeckOutput, DeckTimer};
use crate::timeline::{Timeline, TimerId};

/// Timer payloads of a replayed deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckTick {
    Autoplay,
    Settle,
    Resume,
}

/// A card deck bound to a simulated clock.
#[derive(Debug)]
pub struct DeckReplay {
    deck: CardDeck,
    timeline: Timeline<DeckTick>,
    autoplay: Option<TimerId>,
    settle: Option<TimerId>,
    resume: Option<TimerId>,
}

impl DeckReplay {
    /// Wrap `deck` and apply its initial output.
    pub fn new(deck: CardDeck) -> Self {
        let start = deck.start();
        let mut replay = Self {
            deck,
            timeline: Timeline::new(),
            autoplay: None,
            settle: None,
            resume: None,
        };
        replay.apply(&start);
        replay
    }

    pub fn deck(&self) -> &CardDeck {
        &self.deck
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Run a deck operation and apply its timer requests.
    pub fn dispatch(&mut self, op: impl FnOnce(&mut CardDeck) -> DeckOutput) -> DeckOutput {
        let out = op(&mut self.deck);
        self.apply(&out);
        out
    }

    /// Advance the clock by `by`, firing due timers.
    ///
    /// `observe` sees every timer-driven output along with the time it
    /// happened at.
    pub fn advance(&mut self, by: Duration, mut observe: impl FnMut(Duration, &CardDeck, &DeckOutput)) {
        let deadline = self.timeline.now() + by;
        while let Some((id, tick)) = self.timeline.fire_next(deadline) {
            let out = match tick {
                DeckTick::Autoplay => self.deck.autoplay_tick(),
                DeckTick::Settle => {
                    self.settle = None;
                    self.deck.settle()
                }
                DeckTick::Resume => {
                    self.resume = None;
                    DeckOutput {
                        timers: vec![DeckTimer::StartAutoplay],
                        ..Default::default()
                    }
                }
            };
            debug_assert!(tick != DeckTick::Autoplay || self.autoplay == Some(id));
            self.apply(&out);
            observe(self.timeline.now(), &self.deck, &out);
        }
        self.timeline.advance_to(deadline);
    }

    fn apply(&mut self, out: &DeckOutput) {
        for timer in &out.timers {
            match *timer {
                DeckTimer::StartAutoplay => {
                    self.stop_autoplay();
                    let period = self.deck.config().autoplay_interval();
                    self.autoplay = Some(self.timeline.schedule_every(period, DeckTick::Autoplay));
                }
                DeckTimer::StopAutoplay => self.stop_autoplay(),
                DeckTimer::Settle(delay) => {
                    if let Some(id) = self.settle.take() {
                        self.timeline.cancel(id);
                    }
                    self.settle = Some(self.timeline.schedule(delay, DeckTick::Settle));
                }
                DeckTimer::ResumeAutoplay(delay) => {
                    if let Some(id) = self.resume.take() {
                        self.timeline.cancel(id);
                    }
                    self.resume = Some(self.timeline.schedule(delay, DeckTick::Resume));
                }
            }
        }
    }

    fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay.take() {
            self.timeline.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckConfig;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn replay(len: usize) -> DeckReplay {
        DeckReplay::new(CardDeck::new(len, DeckConfig::stacking()).unwrap())
    }

    fn ignore(_: Duration, _: &CardDeck, _: &DeckOutput) {}

    #[test]
    fn test_autoplay_schedule() {
        let mut replay = replay(5);
        assert!(!replay.autoplay_running());

        replay.advance(ms(1000), ignore);
        assert!(replay.autoplay_running());
        assert_eq!(replay.deck().active_index(), 0);

        // First autoplay swap at 1000 + 4000.
        replay.advance(ms(3999), ignore);
        assert_eq!(replay.deck().active_index(), 0);
        replay.advance(ms(1), ignore);
        assert_eq!(replay.deck().active_index(), 1);
        assert!(replay.deck().is_animating());
        assert!(!replay.autoplay_running());

        // Settles after 600ms and restarts the interval from there.
        replay.advance(ms(600), ignore);
        assert!(!replay.deck().is_animating());
        assert!(replay.autoplay_running());

        replay.advance(ms(4000), ignore);
        assert_eq!(replay.deck().active_index(), 2);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut replay = replay(4);
        let mut swaps = Vec::new();
        replay.advance(ms(1000 + 4 * 4600), |at, deck, out| {
            if out.timers.contains(&DeckTimer::StopAutoplay) {
                swaps.push((at.as_millis(), deck.active_index()));
            }
        });
        assert_eq!(
            swaps,
            vec![(5000, 1), (9600, 2), (14200, 3), (18800, 0)]
        );
    }

    #[test]
    fn test_hover_pauses_autoplay() {
        let mut replay = replay(3);
        replay.advance(ms(1500), ignore);
        replay.dispatch(|deck| deck.hover(true));
        assert!(!replay.autoplay_running());

        replay.advance(ms(10_000), ignore);
        assert_eq!(replay.deck().active_index(), 0);

        replay.dispatch(|deck| deck.hover(false));
        replay.advance(ms(4000), ignore);
        assert_eq!(replay.deck().active_index(), 1);
    }

    #[test]
    fn test_drag_commit_and_cooldown() {
        let mut replay = replay(5);
        replay.advance(ms(2000), ignore);

        replay.dispatch(|deck| deck.pointer_down(400.0));
        assert!(!replay.autoplay_running());
        replay.dispatch(|deck| deck.pointer_move(370.0));
        replay.dispatch(|deck| deck.pointer_up(340.0));
        assert_eq!(replay.deck().active_index(), 1);

        // Settle restarts autoplay at +600; the cooldown restarts it again
        // at +1000, so the next swap lands 4000ms after that.
        replay.advance(ms(1000), ignore);
        assert!(replay.autoplay_running());
        replay.advance(ms(3999), ignore);
        assert_eq!(replay.deck().active_index(), 1);
        replay.advance(ms(1), ignore);
        assert_eq!(replay.deck().active_index(), 2);
    }

    #[test]
    fn test_single_pending_cooldown() {
        let mut replay = replay(5);
        replay.dispatch(|deck| deck.hover(true));
        for _ in 0..3 {
            replay.dispatch(|deck| deck.pointer_down(0.0));
            replay.dispatch(|deck| deck.pointer_up(5.0));
        }
        let mut restarts = 0;
        replay.advance(ms(1000), |_, _, out| {
            if out.timers.contains(&DeckTimer::StartAutoplay) {
                restarts += 1;
            }
        });
        assert_eq!(restarts, 1);
    }

    #[test]
    fn test_drag_scenario_five_cards() {
        let mut replay = replay(5);
        replay.dispatch(|deck| deck.pointer_down(500.0));
        replay.dispatch(|deck| deck.pointer_up(440.0));
        assert_eq!(replay.deck().active_index(), 1);
    }
}
