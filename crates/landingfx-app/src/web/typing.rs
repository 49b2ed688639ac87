//! Typing loop binding.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use landingfx_core::{CursorBlink, TypingConfig, TypingLoop, WidgetResult};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::dom::{cast, dom_err, set_style, timer_millis};

const TEXT_SELECTOR: &str = ".typing-text";
const CURSOR_SELECTOR: &str = ".typing-cursor";
const CONFIG_ATTRIBUTE: &str = "data-typing-config";
const WORDS_ATTRIBUTE: &str = "data-words";

struct TypingView {
    text: HtmlElement,
    model: RefCell<TypingLoop>,
    step: RefCell<Option<Timeout>>,
}

/// Start the typing loop. Returns `false` when the page has no typing text.
pub fn mount(document: &Document) -> WidgetResult<bool> {
    let Some(text) = document.query_selector(TEXT_SELECTOR).map_err(dom_err)? else {
        return Ok(false);
    };

    let config = TypingConfig::from_attributes(
        text.get_attribute(CONFIG_ATTRIBUTE).as_deref(),
        text.get_attribute(WORDS_ATTRIBUTE).as_deref(),
    )
    .unwrap_or_else(|err| {
        log::warn!("Ignoring typing attributes: {}", err);
        TypingConfig::default()
    });
    let blink = config.cursor_blink();

    let view = Rc::new(TypingView {
        text: cast(text, "typing text")?,
        model: RefCell::new(TypingLoop::new(config)?),
        step: RefCell::new(None),
    });
    view.step();

    let cursor = document
        .query_selector(CURSOR_SELECTOR)
        .map_err(dom_err)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(cursor) = cursor {
        let style = cursor.style();
        let opacity = style.get_property_value("opacity").unwrap_or_default();
        let mut state = CursorBlink::from_opacity(&opacity);
        Interval::new(timer_millis(blink), move || {
            if let Err(err) = set_style(&style, "opacity", Some(state.toggle())) {
                log::warn!("Cursor blink failed: {}", err);
            }
        })
        .forget();
    }

    Ok(true)
}

impl TypingView {
    /// Render one tick and schedule the next.
    fn step(self: &Rc<Self>) {
        let tick = self.model.borrow_mut().tick();
        self.text.set_text_content(Some(&tick.text));

        let view = Rc::clone(self);
        let timeout = Timeout::new(timer_millis(tick.delay), move || view.step());
        *self.step.borrow_mut() = Some(timeout);
    }
}
