//! Pill switcher binding.
//!
//! Every `.switcher` container gets its own view. Each toggle placement runs
//! on its own animation frame, after layout has caught up with the selection
//! change.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use kurbo::Rect;
use landingfx_core::switcher::RESIZE_DEBOUNCE;
use landingfx_core::{
    Switcher, SwitcherLayout, ToggleStyle, WidgetResult, link_prevents_navigation,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::dom::{bounding_rect, cast, dom_err, elements, listen, query_all, timer_millis};

const CONTAINER_SELECTOR: &str = ".switcher";
const OPTION_SELECTOR: &str = ".switcher__option";
const RADIO_SELECTOR: &str = "input[type=\"radio\"]";

/// Live layout of a switcher, read on every call.
struct DomLayout<'a> {
    container: &'a Element,
    options: &'a [Element],
}

impl SwitcherLayout for DomLayout<'_> {
    fn container_rect(&self) -> Option<Rect> {
        let rect = bounding_rect(self.container);
        // A container that was never laid out reports an empty box.
        (rect.width() > 0.0 || rect.height() > 0.0).then_some(rect)
    }

    fn option_rect(&self, index: usize) -> Option<Rect> {
        self.options.get(index).map(bounding_rect)
    }
}

pub struct SwitcherView {
    container: HtmlElement,
    options: Vec<Element>,
    radios: Vec<Option<HtmlInputElement>>,
    model: RefCell<Switcher>,
    /// Frames requested and not yet run, keyed by request number.
    frames: RefCell<Vec<(u64, AnimationFrame)>>,
    next_frame: Cell<u64>,
    /// Delayed startup placements; dropping them cancels.
    startup: RefCell<Vec<Timeout>>,
    resize: RefCell<Option<Timeout>>,
}

/// Bind every switcher in the document. Returns how many were bound.
pub fn mount_all(document: &Document) -> WidgetResult<usize> {
    let containers = document
        .query_selector_all(CONTAINER_SELECTOR)
        .map(elements)
        .map_err(dom_err)?;

    let mut mounted = 0;
    for container in containers {
        match mount(container) {
            Ok(_) => mounted += 1,
            Err(err) => log::warn!("Switcher not mounted: {}", err),
        }
    }
    Ok(mounted)
}

fn mount(container: Element) -> WidgetResult<Rc<SwitcherView>> {
    let options = query_all(&container, OPTION_SELECTOR)?;
    let radios = options
        .iter()
        .map(|option| {
            option
                .query_selector(RADIO_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        })
        .collect::<Vec<_>>();
    let checked = checked_index(&radios);

    let view = Rc::new(SwitcherView {
        container: cast(container, "switcher container")?,
        model: RefCell::new(Switcher::new(options.len(), checked)),
        options,
        radios,
        frames: RefCell::new(Vec::new()),
        next_frame: Cell::new(0),
        startup: RefCell::new(Vec::new()),
        resize: RefCell::new(None),
    });

    let requests = view.model.borrow().startup();
    for request in requests {
        if request.delay.is_zero() {
            view.queue_place(request.index);
            continue;
        }
        let delayed = Rc::clone(&view);
        let timeout = Timeout::new(timer_millis(request.delay), move || {
            delayed.queue_place(request.index);
        });
        view.startup.borrow_mut().push(timeout);
    }

    view.install_listeners()?;
    log::info!("Switcher ready: {} options", view.options.len());
    Ok(view)
}

/// Last checked radio, matching how a radio group reports its value.
fn checked_index(radios: &[Option<HtmlInputElement>]) -> Option<usize> {
    radios
        .iter()
        .rposition(|radio| radio.as_ref().is_some_and(HtmlInputElement::checked))
}

impl SwitcherView {
    fn install_listeners(self: &Rc<Self>) -> WidgetResult<()> {
        let window = web_sys::window().ok_or_else(|| dom_err("no window".into()))?;
        let view = Rc::clone(self);
        listen(&window, "resize", true, move |_| {
            let debounced = Rc::clone(&view);
            // Replacing the pending timeout cancels it.
            let timeout = Timeout::new(timer_millis(RESIZE_DEBOUNCE), move || {
                debounced.refresh();
            });
            *view.resize.borrow_mut() = Some(timeout);
        });

        for (index, option) in self.options.iter().enumerate() {
            if let Some(radio) = &self.radios[index] {
                let view = Rc::clone(self);
                let source = radio.clone();
                listen(radio, "change", true, move |_| {
                    if source.checked() {
                        view.model.borrow_mut().select(index);
                        view.queue_place(index);
                    }
                });
            }

            let link = option.query_selector("a").map_err(dom_err)?;
            if let Some(link) = link {
                let view = Rc::clone(self);
                let href = link.get_attribute("href");
                listen(&link, "click", false, move |event| {
                    if let Some(radio) = &view.radios[index] {
                        radio.set_checked(true);
                        view.model.borrow_mut().select(index);
                        view.queue_place(index);
                    }
                    if link_prevents_navigation(href.as_deref()) {
                        event.prevent_default();
                    }
                });
            } else {
                let view = Rc::clone(self);
                listen(option, "click", true, move |_| {
                    let Some(radio) = &view.radios[index] else {
                        return;
                    };
                    if !radio.checked() {
                        radio.set_checked(true);
                        view.model.borrow_mut().select(index);
                        view.queue_place(index);
                    }
                });
            }
        }
        Ok(())
    }

    /// Place the toggle on `index` at the next animation frame.
    ///
    /// Every call gets its own frame, so back-to-back requests each measure.
    fn queue_place(self: &Rc<Self>, index: usize) {
        let id = self.next_frame.get();
        self.next_frame.set(id + 1);

        let view = Rc::clone(self);
        let frame = request_animation_frame(move |_| {
            view.frames.borrow_mut().retain(|(pending, _)| *pending != id);
            view.place(index);
        });
        self.frames.borrow_mut().push((id, frame));
    }

    /// Re-place the toggle on the checked radio after a resize.
    fn refresh(&self) {
        let layout = DomLayout {
            container: &self.container,
            options: &self.options,
        };
        let toggle = {
            let mut model = self.model.borrow_mut();
            if let Some(index) = checked_index(&self.radios) {
                model.select(index);
            }
            model.refresh(&layout)
        };
        if let Some(toggle) = toggle {
            self.write(toggle);
        }
    }

    /// Measure and write the toggle properties now.
    fn place(&self, index: usize) {
        let layout = DomLayout {
            container: &self.container,
            options: &self.options,
        };
        let Some(toggle) = self.model.borrow_mut().place(&layout, index) else {
            return;
        };
        self.write(toggle);
    }

    fn write(&self, toggle: ToggleStyle) {
        let style = self.container.style();
        for (property, value) in toggle.properties() {
            if let Err(err) = style.set_property(property, &value) {
                log::warn!("Failed to set {}: {:?}", property, err);
            }
        }
    }
}
