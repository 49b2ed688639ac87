//! Pill switcher model.
//!
//! A switcher is a row of radio-backed options with one moving highlight (the
//! pill toggle) sitting behind the selected option. Geometry is never cached:
//! it is recomputed from the live layout every time it is needed, since any
//! reflow would make a stored value stale.

use std::time::Duration;

use kurbo::Rect;

/// Horizontal inset of the toggle inside its container (CSS `left: 4px`).
pub const TOGGLE_INSET: f64 = 4.0;

/// Extra width added on each side of the selected option so the pill
/// matches the rounded outer container.
pub const TOGGLE_PADDING: f64 = 8.0;

/// Delay of the second initial measurement, for layouts that settle late.
pub const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Debounce window for recomputing on window resize.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Custom properties written on the switcher container.
pub const WIDTH_PROPERTY: &str = "--toggle-width";
pub const TRANSLATE_PROPERTY: &str = "--toggle-translate";
pub const ORIGIN_PROPERTY: &str = "--toggle-origin";

/// Source of layout rectangles for a switcher.
///
/// Rectangles share one coordinate space (the viewport for a browser).
/// `None` means layout is not available yet.
pub trait SwitcherLayout {
    /// Bounding box of the switcher container.
    fn container_rect(&self) -> Option<Rect>;

    /// Bounding box of the option at `index`, if it exists.
    fn option_rect(&self, index: usize) -> Option<Rect>;
}

/// Size and position of the pill toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleGeometry {
    /// Toggle width in pixels.
    pub width: f64,
    /// Horizontal translation in pixels.
    pub offset: f64,
}

/// Compute toggle geometry for the option at `index`.
///
/// Returns `None` when the option does not exist or layout is unavailable.
pub fn compute_geometry<L: SwitcherLayout + ?Sized>(
    layout: &L,
    index: usize,
) -> Option<ToggleGeometry> {
    let option = layout.option_rect(index)?;
    let container = layout.container_rect()?;

    Some(ToggleGeometry {
        width: option.width() + TOGGLE_PADDING * 2.0,
        offset: option.x0 - container.x0 - TOGGLE_INSET - TOGGLE_PADDING,
    })
}

/// Side the toggle grows from while it animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOrigin {
    Left,
    Right,
}

impl ToggleOrigin {
    /// Pick the origin for a move from `previous` to `current`.
    pub fn between(previous: Option<usize>, current: usize) -> Self {
        match previous {
            Some(previous) if current <= previous => Self::Right,
            _ => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Everything written onto the container for one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleStyle {
    pub geometry: ToggleGeometry,
    pub origin: ToggleOrigin,
}

impl ToggleStyle {
    /// Custom property name/value pairs, in write order.
    pub fn properties(&self) -> [(&'static str, String); 3] {
        [
            (WIDTH_PROPERTY, format!("{}px", self.geometry.width)),
            (TRANSLATE_PROPERTY, format!("{}px", self.geometry.offset)),
            (ORIGIN_PROPERTY, self.origin.as_str().to_string()),
        ]
    }
}

/// Whether clicking a link with this `href` must not navigate.
///
/// Only the bare placeholder `#` is swallowed; real targets navigate.
pub fn link_prevents_navigation(href: Option<&str>) -> bool {
    href == Some("#")
}

/// A toggle placement the host must run after `delay`, on its own
/// animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub index: usize,
    pub delay: Duration,
}

/// Selection state of one switcher.
#[derive(Debug, Clone)]
pub struct Switcher {
    option_count: usize,
    /// Currently checked option.
    selected: Option<usize>,
    /// Option the toggle was last placed on.
    previous: Option<usize>,
}

impl Switcher {
    /// Create a switcher over `option_count` options.
    ///
    /// An out-of-range initial selection is treated as no selection.
    pub fn new(option_count: usize, selected: Option<usize>) -> Self {
        Self {
            option_count,
            selected: selected.filter(|&index| index < option_count),
            previous: None,
        }
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Mark `index` as the checked option. Returns true if it changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.option_count || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Placements to run once the switcher is bound: one right away and a
    /// second after [`SETTLE_DELAY`] for layouts that are still settling.
    /// Empty when nothing is checked.
    pub fn startup(&self) -> Vec<PlacementRequest> {
        let Some(index) = self.selected else {
            return Vec::new();
        };
        [Duration::ZERO, SETTLE_DELAY]
            .into_iter()
            .map(|delay| PlacementRequest { index, delay })
            .collect()
    }

    /// Whether `index` is the checked option.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Place the toggle on `index` using the current layout.
    ///
    /// The transition origin is derived from the option the toggle was last
    /// placed on. Only a successful computation moves that reference.
    pub fn place<L: SwitcherLayout + ?Sized>(
        &mut self,
        layout: &L,
        index: usize,
    ) -> Option<ToggleStyle> {
        if index >= self.option_count {
            return None;
        }
        let geometry = compute_geometry(layout, index)?;
        let origin = ToggleOrigin::between(self.previous, index);
        self.previous = Some(index);

        log::debug!(
            "switcher toggle -> option {} (width {}, offset {}, origin {})",
            index,
            geometry.width,
            geometry.offset,
            origin.as_str()
        );

        Some(ToggleStyle { geometry, origin })
    }

    /// Re-place the toggle on the checked option, e.g. after a resize.
    pub fn refresh<L: SwitcherLayout + ?Sized>(&mut self, layout: &L) -> Option<ToggleStyle> {
        let index = self.selected?;
        self.place(layout, index)
    }
}
