//! Stacked card deck.
//!
//! One card is active and sits on top; the others are layered behind it by
//! their circular distance from the active card. The deck swaps cards on a
//! timer (autoplay) and on drag, wheel, keyboard and click input, with at most
//! one animated swap in flight.
//!
//! [`CardDeck`] owns the logical state and the presentational state of every
//! card. Each operation returns a [`DeckOutput`] naming the cards whose
//! [`CardStyle`] changed and the timers the host has to arm or cancel.

mod config;
mod gesture;
mod replay;
mod style;

pub use config::{DeckConfig, DeckPreset};
pub use gesture::{
    Direction, DragTracker, drag_direction, drag_feedback, key_direction, wheel_direction,
};
pub use replay::{DeckReplay, DeckTick};
pub use style::{CardClass, CardClasses, CardStyle};

use std::time::Duration;

use kurbo::Vec2;

use crate::error::{WidgetError, WidgetResult};

/// Z-index band above which the active card is drawn.
const Z_BASE: i32 = 100;
/// Z-index offset of the outgoing card during a swap.
const Z_EXITING: i32 = 50;
/// Z-index offset of the incoming card during a swap.
const Z_ENTERING: i32 = 150;
/// Vertical travel of the two cards involved in a swap.
const SWAP_TRAVEL: f64 = 20.0;
/// Opacity of the two cards involved in a swap.
const SWAP_OPACITY: f64 = 0.8;
/// Where cards beyond the visible stack are parked.
const HIDDEN_OFFSET: f64 = -100.0;

/// Timer requests emitted by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckTimer {
    /// Cancel any running autoplay timer, then start a new one.
    StartAutoplay,
    /// Cancel the running autoplay timer.
    StopAutoplay,
    /// Call [`CardDeck::settle`] once after the given delay.
    Settle(Duration),
    /// Replace any pending restart with a one-shot [`DeckTimer::StartAutoplay`]
    /// after the given delay.
    ResumeAutoplay(Duration),
}

/// Result of one deck operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckOutput {
    /// Cards whose style changed, in first-change order.
    pub restyled: Vec<usize>,
    /// Timer requests, in order.
    pub timers: Vec<DeckTimer>,
    /// The triggering event's default action must be suppressed.
    pub prevent_default: bool,
}

impl DeckOutput {
    pub fn is_empty(&self) -> bool {
        self.restyled.is_empty() && self.timers.is_empty() && !self.prevent_default
    }

    fn restyle(&mut self, index: usize) {
        if !self.restyled.contains(&index) {
            self.restyled.push(index);
        }
    }

    fn merge(&mut self, other: DeckOutput) {
        for index in other.restyled {
            self.restyle(index);
        }
        self.timers.extend(other.timers);
        self.prevent_default |= other.prevent_default;
    }
}

/// Animation phase of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    Idle,
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

/// Circular distance of card `index` behind the `active` card.
///
/// Zero for the active card, otherwise in `1..len`.
pub fn stack_distance(index: usize, active: usize, len: usize) -> usize {
    if index <= active {
        active - index
    } else {
        len - index + active
    }
}

/// A fixed set of stacked cards.
#[derive(Debug, Clone)]
pub struct CardDeck {
    config: DeckConfig,
    active: usize,
    phase: DeckPhase,
    drag: DragTracker,
    styles: Vec<CardStyle>,
}

impl CardDeck {
    /// Create a deck of `len` cards with card 0 active and the stack laid out.
    pub fn new(len: usize, config: DeckConfig) -> WidgetResult<Self> {
        if len == 0 {
            return Err(WidgetError::EmptyDeck);
        }
        let mut deck = Self {
            config,
            active: 0,
            phase: DeckPhase::Idle,
            drag: DragTracker::default(),
            styles: vec![CardStyle::default(); len],
        };
        deck.layout();
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, DeckPhase::Transitioning { .. })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn style(&self, index: usize) -> Option<&CardStyle> {
        self.styles.get(index)
    }

    pub fn styles(&self) -> &[CardStyle] {
        &self.styles
    }

    /// Initial render: every card styled, autoplay armed after its start delay.
    pub fn start(&self) -> DeckOutput {
        log::info!(
            "Card deck ready: {} cards, {}ms swaps",
            self.len(),
            self.config.animation_duration_ms
        );
        DeckOutput {
            restyled: (0..self.len()).collect(),
            timers: vec![DeckTimer::ResumeAutoplay(self.config.autoplay_start_delay())],
            prevent_default: false,
        }
    }

    /// Make `target` the active card.
    ///
    /// No-op if it is already active, out of range, or a swap is running.
    /// Without an explicit direction it is inferred from the index order.
    pub fn request_activate(&mut self, target: usize, direction: Option<Direction>) -> DeckOutput {
        let mut out = DeckOutput::default();
        if self.is_animating() || target == self.active || target >= self.len() {
            return out;
        }

        let from = self.active;
        let direction = direction.unwrap_or_else(|| Direction::between(from, target));
        let len = self.len() as i32;
        let duration = self.config.animation_duration_ms;
        let travel = match direction {
            Direction::Next => SWAP_TRAVEL,
            Direction::Prev => -SWAP_TRAVEL,
        };

        out.timers.push(DeckTimer::StopAutoplay);

        // A swap takes over whatever drag feedback was showing.
        self.drag.mark_displaced(false);

        let outgoing = &mut self.styles[from];
        outgoing.classes.remove(CardClass::Dragging);
        outgoing.classes.insert(CardClass::Exiting);
        outgoing.transition_ms = Some(duration);
        outgoing.translate_y = Some(travel);
        outgoing.opacity = Some(SWAP_OPACITY);
        outgoing.z_index = Some(len + Z_EXITING);

        let incoming = &mut self.styles[target];
        incoming.classes.insert(CardClass::Entering);
        incoming.transition_ms = Some(duration);
        incoming.translate_y = Some(-travel);
        incoming.opacity = Some(SWAP_OPACITY);
        incoming.z_index = Some(len + Z_ENTERING);

        out.restyle(from);
        out.restyle(target);

        self.active = target;
        self.phase = DeckPhase::Transitioning {
            from,
            to: target,
            direction,
        };
        out.timers
            .push(DeckTimer::Settle(self.config.animation_duration()));

        log::debug!("card deck {:?}: {} -> {}", direction, from, target);
        out
    }

    pub fn next(&mut self) -> DeckOutput {
        let target = Direction::Next.step(self.active, self.len());
        self.request_activate(target, Some(Direction::Next))
    }

    pub fn prev(&mut self) -> DeckOutput {
        let target = Direction::Prev.step(self.active, self.len());
        self.request_activate(target, Some(Direction::Prev))
    }

    /// Move one card in `direction`.
    pub fn step(&mut self, direction: Direction) -> DeckOutput {
        match direction {
            Direction::Next => self.next(),
            Direction::Prev => self.prev(),
        }
    }

    /// Finish the running swap: restack every card and resume autoplay.
    pub fn settle(&mut self) -> DeckOutput {
        if !self.is_animating() {
            return DeckOutput::default();
        }
        self.phase = DeckPhase::Idle;
        self.layout();
        log::debug!("card deck settled on {}", self.active);
        DeckOutput {
            restyled: (0..self.len()).collect(),
            timers: vec![DeckTimer::StartAutoplay],
            prevent_default: false,
        }
    }

    /// One autoplay period elapsed.
    pub fn autoplay_tick(&mut self) -> DeckOutput {
        self.next()
    }

    /// A card was clicked.
    pub fn click(&mut self, index: usize) -> DeckOutput {
        let is_active = self
            .styles
            .get(index)
            .is_some_and(|s| s.classes.contains(CardClass::Active));
        if is_active || self.is_animating() {
            return DeckOutput::default();
        }
        self.request_activate(index, None)
    }

    /// Wheel over the deck. Scrolling the page is always suppressed.
    pub fn wheel(&mut self, delta: Vec2) -> DeckOutput {
        let mut out = match wheel_direction(delta) {
            Some(direction) => self.step(direction),
            None => DeckOutput::default(),
        };
        out.prevent_default = true;
        out
    }

    /// Key pressed anywhere on the page.
    pub fn key(&mut self, key: &str) -> DeckOutput {
        match key_direction(key) {
            Some(direction) => self.step(direction),
            None => DeckOutput::default(),
        }
    }

    /// Pointer entered (`true`) or left (`false`) the deck.
    pub fn hover(&mut self, entered: bool) -> DeckOutput {
        DeckOutput {
            timers: vec![if entered {
                DeckTimer::StopAutoplay
            } else {
                DeckTimer::StartAutoplay
            }],
            ..Default::default()
        }
    }

    /// Mouse button or touch pressed on the deck at vertical position `y`.
    pub fn pointer_down(&mut self, y: f64) -> DeckOutput {
        if self.is_animating() {
            return DeckOutput::default();
        }
        self.drag.begin(y);
        DeckOutput {
            timers: vec![DeckTimer::StopAutoplay],
            ..Default::default()
        }
    }

    /// Pointer moved anywhere on the page.
    pub fn pointer_move(&mut self, y: f64) -> DeckOutput {
        let mut out = DeckOutput::default();
        if !self.drag.is_active() || self.is_animating() {
            return out;
        }
        out.prevent_default = true;

        let Some(distance) = self.drag.update(y) else {
            return out;
        };
        if let Some((offset, opacity)) = drag_feedback(distance, &self.config) {
            let card = &mut self.styles[self.active];
            card.translate_y = Some(offset);
            card.opacity = Some(opacity);
            card.classes.insert(CardClass::Dragging);
            self.drag.mark_displaced(true);
            out.restyle(self.active);
        }
        out
    }

    /// Pointer released anywhere on the page.
    pub fn pointer_up(&mut self, y: f64) -> DeckOutput {
        let mut out = DeckOutput::default();
        let Some((distance, displaced)) = self.drag.end(y) else {
            return out;
        };

        if displaced {
            let card = &mut self.styles[self.active];
            card.translate_y = None;
            card.opacity = None;
            card.classes.remove(CardClass::Dragging);
            out.restyle(self.active);
        }

        if let Some(direction) = drag_direction(distance, &self.config) {
            out.merge(self.step(direction));
        }

        out.timers
            .push(DeckTimer::ResumeAutoplay(self.config.autoplay_cooldown()));
        out
    }

    /// Lay out every card around the active one.
    fn layout(&mut self) {
        let len = self.len();
        let active = self.active;
        let visible = self.config.visible_stack_count;
        let step = self.config.stack_offset_step;
        let z_top = len as i32 + Z_BASE;

        for (index, style) in self.styles.iter_mut().enumerate() {
            *style = CardStyle::default();

            if index == active {
                style.classes.insert(CardClass::Active);
                style.z_index = Some(z_top);
                style.translate_y = Some(0.0);
                style.stack_index = Some(0);
                style.opacity = Some(1.0);
                continue;
            }

            let distance = stack_distance(index, active, len);
            if distance <= visible {
                style.classes.insert(CardClass::Stacked);
                style.z_index = Some(z_top - distance as i32);
                style.stack_index = Some(distance);
                style.translate_y = Some(-(distance as f64) * step);
                style.opacity = Some(1.0);
            } else {
                style.opacity = Some(0.0);
                style.interactive = false;
                style.translate_y = Some(HIDDEN_OFFSET);
                style.z_index = Some(0);
            }
        }
    }
}
