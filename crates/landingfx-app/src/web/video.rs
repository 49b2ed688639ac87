//! Background video autoplay.

use gloo::events::EventListener;
use landingfx_core::WidgetResult;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlVideoElement};

use super::dom::dom_err;

const VIDEO_SELECTOR: &str = ".video-bg video";

/// Ask the background video to play. If the browser blocks autoplay, the
/// next click anywhere on the page retries once.
pub fn mount(document: &Document) -> WidgetResult<bool> {
    let Some(video) = document
        .query_selector(VIDEO_SELECTOR)
        .map_err(dom_err)?
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
    else {
        return Ok(false);
    };

    let document = document.clone();
    spawn_local(async move {
        if play(&video).await {
            return;
        }
        log::info!("Video autoplay blocked, waiting for a click");
        EventListener::once(&document, "click", move |_| {
            spawn_local(async move {
                if !play(&video).await {
                    log::warn!("Video playback failed after click");
                }
            });
        })
        .forget();
    });
    Ok(true)
}

async fn play(video: &HtmlVideoElement) -> bool {
    match video.play() {
        Ok(promise) => JsFuture::from(promise).await.is_ok(),
        Err(err) => {
            log::debug!("play() threw: {:?}", err);
            false
        }
    }
}
