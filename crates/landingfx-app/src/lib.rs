//! landingfx Application
//!
//! Binds the landing page widgets to the document when compiled to WASM, and
//! provides a native preview that replays them on a simulated clock.

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod preview;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use preview::{PreviewArgs, PreviewMode, run_preview};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CardDeckHandle, run_wasm};
