//! Small DOM helpers shared by the widget bindings.

use std::time::Duration;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use kurbo::Rect;
use landingfx_core::{WidgetError, WidgetResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, Element, Event, EventTarget, MouseEvent, NodeList, TouchEvent,
};

/// Convert a JS exception into a widget error.
pub fn dom_err(err: JsValue) -> WidgetError {
    WidgetError::Dom(format!("{:?}", err))
}

/// Collect the elements of a node list, skipping non-element nodes.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All descendants of `root` matching `selector`.
pub fn query_all(root: &Element, selector: &str) -> WidgetResult<Vec<Element>> {
    root.query_selector_all(selector)
        .map(elements)
        .map_err(dom_err)
}

/// Cast an element, reporting `what` when it has the wrong type.
pub fn cast<T: JsCast>(element: Element, what: &str) -> WidgetResult<T> {
    element
        .dyn_into::<T>()
        .map_err(|_| WidgetError::Dom(format!("{} has an unexpected element type", what)))
}

/// Viewport-relative bounding box of `element`.
pub fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

/// Set an inline style property, or remove it when `value` is `None`.
pub fn set_style(
    style: &CssStyleDeclaration,
    property: &str,
    value: Option<&str>,
) -> WidgetResult<()> {
    match value {
        Some(value) => style.set_property(property, value).map_err(dom_err),
        None => style.remove_property(property).map(|_| ()).map_err(dom_err),
    }
}

/// Vertical pointer position of a mouse or touch event.
///
/// Touch events use the first active touch, falling back to the first
/// changed touch (the finger that was just lifted).
pub fn client_y(event: &Event) -> Option<f64> {
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        let touch = touch_event
            .touches()
            .get(0)
            .or_else(|| touch_event.changed_touches().get(0))?;
        return Some(f64::from(touch.client_y()));
    }
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| f64::from(mouse.client_y()))
}

/// Millisecond delay for browser timers.
pub fn timer_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Attach a listener for the rest of the page session.
///
/// Non-passive listeners may call `preventDefault`.
pub fn listen<F>(target: &EventTarget, event_type: &'static str, passive: bool, callback: F)
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive,
        },
        callback,
    )
    .forget();
}
