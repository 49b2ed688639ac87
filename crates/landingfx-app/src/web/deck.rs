//! Card deck binding.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use kurbo::Vec2;
use landingfx_core::{
    CardClass, CardDeck, CardStyle, DeckConfig, DeckOutput, DeckTimer, WidgetError, WidgetResult,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, WheelEvent};

use super::dom::{cast, client_y, dom_err, listen, query_all, set_style, timer_millis};

const CONTAINER_ID: &str = "cardsStack";
const CARD_SELECTOR: &str = ".stack-card";
const PRESET_ATTRIBUTE: &str = "data-deck-preset";
const CONFIG_ATTRIBUTE: &str = "data-deck-config";

struct DeckView {
    container: HtmlElement,
    cards: Vec<HtmlElement>,
    model: RefCell<CardDeck>,
    autoplay: RefCell<Option<Interval>>,
    settle: RefCell<Option<Timeout>>,
    resume: RefCell<Option<Timeout>>,
}

/// Control handle of a mounted card deck.
#[derive(Clone)]
pub struct CardDeckHandle {
    view: Rc<DeckView>,
}

impl CardDeckHandle {
    pub fn next(&self) {
        self.view.dispatch(None, CardDeck::next);
    }

    pub fn prev(&self) {
        self.view.dispatch(None, CardDeck::prev);
    }

    /// Activate the card at `index`, animating in the inferred direction.
    pub fn activate(&self, index: usize) {
        self.view.dispatch(None, |deck| deck.request_activate(index, None));
    }

    pub fn card_count(&self) -> usize {
        self.view.cards.len()
    }

    pub fn active_index(&self) -> usize {
        self.view.model.borrow().active_index()
    }

    pub fn pause(&self) {
        self.view.apply_timers(&[DeckTimer::StopAutoplay]);
    }

    pub fn resume(&self) {
        self.view.apply_timers(&[DeckTimer::StartAutoplay]);
    }
}

/// Bind the card deck. Fails if the container is missing or has no cards.
pub fn mount(document: &Document) -> WidgetResult<CardDeckHandle> {
    let container = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| WidgetError::MissingElement(format!("#{}", CONTAINER_ID)))?;

    let preset = container.get_attribute(PRESET_ATTRIBUTE);
    let overrides = container.get_attribute(CONFIG_ATTRIBUTE);
    let config = DeckConfig::from_attributes(preset.as_deref(), overrides.as_deref())
        .unwrap_or_else(|err| {
            log::warn!("Ignoring {}: {}", CONFIG_ATTRIBUTE, err);
            DeckConfig::for_preset_name(preset.as_deref())
        });

    let cards = query_all(&container, CARD_SELECTOR)?
        .into_iter()
        .map(|card| cast::<HtmlElement>(card, "stack card"))
        .collect::<WidgetResult<Vec<_>>>()?;
    let model = CardDeck::new(cards.len(), config)?;
    let start = model.start();

    let view = Rc::new(DeckView {
        container: cast(container, "card deck container")?,
        cards,
        model: RefCell::new(model),
        autoplay: RefCell::new(None),
        settle: RefCell::new(None),
        resume: RefCell::new(None),
    });
    view.apply(None, start);
    view.install_listeners()?;

    Ok(CardDeckHandle { view })
}

impl DeckView {
    fn install_listeners(self: &Rc<Self>) -> WidgetResult<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| dom_err("no document".into()))?;

        let view = Rc::clone(self);
        listen(&self.container, "wheel", false, move |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let delta = Vec2::new(wheel.delta_x(), wheel.delta_y());
            view.dispatch(Some(event), |deck| deck.wheel(delta));
        });

        for (index, card) in self.cards.iter().enumerate() {
            let view = Rc::clone(self);
            listen(card, "click", true, move |event| {
                view.dispatch(Some(event), |deck| deck.click(index));
            });
        }

        for (event_type, entered) in [("mouseenter", true), ("mouseleave", false)] {
            let view = Rc::clone(self);
            listen(&self.container, event_type, true, move |event| {
                view.dispatch(Some(event), |deck| deck.hover(entered));
            });
        }

        for event_type in ["mousedown", "touchstart"] {
            let view = Rc::clone(self);
            listen(&self.container, event_type, false, move |event| {
                if let Some(y) = client_y(event) {
                    view.dispatch(Some(event), |deck| deck.pointer_down(y));
                }
            });
        }

        for event_type in ["mousemove", "touchmove"] {
            let view = Rc::clone(self);
            listen(&document, event_type, false, move |event| {
                if let Some(y) = client_y(event) {
                    view.dispatch(Some(event), |deck| deck.pointer_move(y));
                }
            });
        }

        for event_type in ["mouseup", "touchend"] {
            let view = Rc::clone(self);
            listen(&document, event_type, true, move |event| {
                if let Some(y) = client_y(event) {
                    view.dispatch(Some(event), |deck| deck.pointer_up(y));
                }
            });
        }

        Ok(())
    }

    /// Run a deck operation and write its effects.
    fn dispatch(
        self: &Rc<Self>,
        event: Option<&Event>,
        op: impl FnOnce(&mut CardDeck) -> DeckOutput,
    ) {
        let out = op(&mut self.model.borrow_mut());
        self.apply(event, out);
    }

    fn apply(self: &Rc<Self>, event: Option<&Event>, out: DeckOutput) {
        if out.prevent_default {
            if let Some(event) = event {
                event.prevent_default();
            }
        }
        self.render(&out.restyled);
        self.apply_timers(&out.timers);
    }

    fn render(&self, indices: &[usize]) {
        let model = self.model.borrow();
        for &index in indices {
            let (Some(card), Some(style)) = (self.cards.get(index), model.style(index)) else {
                continue;
            };
            if let Err(err) = write_card(card, style) {
                log::warn!("Failed to style card {}: {}", index, err);
            }
        }
    }

    fn apply_timers(self: &Rc<Self>, timers: &[DeckTimer]) {
        for timer in timers {
            match *timer {
                DeckTimer::StartAutoplay => {
                    let period = self.model.borrow().config().autoplay_interval();
                    let view = Rc::clone(self);
                    // Replacing the slot cancels the previous interval.
                    let interval = Interval::new(timer_millis(period), move || {
                        view.dispatch(None, CardDeck::autoplay_tick);
                    });
                    *self.autoplay.borrow_mut() = Some(interval);
                }
                DeckTimer::StopAutoplay => {
                    self.autoplay.borrow_mut().take();
                }
                DeckTimer::Settle(delay) => {
                    let view = Rc::clone(self);
                    let timeout = Timeout::new(timer_millis(delay), move || {
                        view.settle.borrow_mut().take();
                        view.dispatch(None, CardDeck::settle);
                    });
                    *self.settle.borrow_mut() = Some(timeout);
                }
                DeckTimer::ResumeAutoplay(delay) => {
                    let view = Rc::clone(self);
                    let timeout = Timeout::new(timer_millis(delay), move || {
                        view.resume.borrow_mut().take();
                        view.apply_timers(&[DeckTimer::StartAutoplay]);
                    });
                    *self.resume.borrow_mut() = Some(timeout);
                }
            }
        }
    }
}

/// Write one card's classes and inline style.
fn write_card(card: &HtmlElement, style: &CardStyle) -> WidgetResult<()> {
    let class_list = card.class_list();
    for class in CardClass::ALL {
        class_list
            .toggle_with_force(class.as_str(), style.classes.contains(class))
            .map_err(dom_err)?;
    }

    let css = card.style();
    set_style(&css, "transition", style.transition_css().as_deref())?;
    set_style(&css, "transform", style.transform_css().as_deref())?;
    set_style(&css, "z-index", style.z_index.map(|z| z.to_string()).as_deref())?;
    set_style(&css, "opacity", style.opacity_css().as_deref())?;
    set_style(&css, "pointer-events", Some(style.pointer_events_css()))?;
    set_style(
        &css,
        "--stack-index",
        style.stack_index.map(|i| i.to_string()).as_deref(),
    )?;
    Ok(())
}
