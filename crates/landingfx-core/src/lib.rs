//! landingfx Core Library
//!
//! Platform-agnostic models for the landing page widgets: the pill switcher,
//! the stacked card deck and the typing loop. Nothing in here touches the DOM;
//! every model consumes plain values and reports what has to be written or
//! scheduled, so the browser shell and the native preview drive the same code.

pub mod config;
pub mod deck;
pub mod error;
pub mod switcher;
pub mod timeline;
pub mod typing;

pub use deck::{
    CardClass, CardClasses, CardDeck, CardStyle, DeckConfig, DeckOutput, DeckPhase, DeckPreset,
    DeckReplay, DeckTimer, Direction, stack_distance,
};
pub use error::{WidgetError, WidgetResult};
pub use switcher::{
    PlacementRequest, Switcher, SwitcherLayout, ToggleGeometry, ToggleOrigin, ToggleStyle,
    compute_geometry, link_prevents_navigation,
};
pub use timeline::{Timeline, TimerId};
pub use typing::{CursorBlink, TypingConfig, TypingLoop, TypingTick};
