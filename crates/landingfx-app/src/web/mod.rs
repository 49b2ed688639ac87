//! Browser shell: binds the core models to the page.

mod deck;
mod dom;
mod switcher;
mod typing;
mod video;

pub use deck::CardDeckHandle;

use gloo::events::EventListener;
use landingfx_core::Direction;
use landingfx_core::deck::key_direction;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

/// Initialize logging and bind every widget once the document is parsed.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger unavailable: {}", err).into());
    }

    log::info!("Starting landingfx (WASM)");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        web_sys::console::error_1(&"landingfx: no document".into());
        return;
    };

    if document.ready_state() == "loading" {
        let ready = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| mount_page(&ready)).forget();
    } else {
        mount_page(&document);
    }
}

fn mount_page(document: &Document) {
    match switcher::mount_all(document) {
        Ok(count) => log::info!("Mounted {} switcher(s)", count),
        Err(err) => log::warn!("Switchers not mounted: {}", err),
    }

    match deck::mount(document) {
        Ok(handle) => {
            log::debug!("Keyboard bound to a deck of {} cards", handle.card_count());
            EventListener::new(document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                match key_direction(&event.key()) {
                    Some(Direction::Next) => handle.next(),
                    Some(Direction::Prev) => handle.prev(),
                    None => return,
                }
                log::debug!("Keyboard moved deck to card {}", handle.active_index());
            })
            .forget();
        }
        Err(err) => log::error!("Card deck not mounted: {}", err),
    }

    match typing::mount(document) {
        Ok(true) => log::info!("Typing loop started"),
        Ok(false) => log::debug!("No typing text on this page"),
        Err(err) => log::warn!("Typing loop not started: {}", err),
    }

    if let Err(err) = video::mount(document) {
        log::warn!("Background video not bound: {}", err);
    }
}
