//! Presentational state of a single card.

/// Semantic state classes toggled on card elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardClass {
    Active,
    Stacked,
    Exiting,
    Entering,
    Dragging,
}

impl CardClass {
    pub const ALL: [CardClass; 5] = [
        Self::Active,
        Self::Stacked,
        Self::Exiting,
        Self::Entering,
        Self::Dragging,
    ];

    /// Class name as used in markup and stylesheets.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Stacked => "stacked",
            Self::Exiting => "exiting",
            Self::Entering => "entering",
            Self::Dragging => "dragging",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of [`CardClass`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardClasses(u8);

impl CardClasses {
    pub fn insert(&mut self, class: CardClass) {
        self.0 |= class.bit();
    }

    pub fn remove(&mut self, class: CardClass) {
        self.0 &= !class.bit();
    }

    pub fn contains(self, class: CardClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Classes present, in [`CardClass::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = CardClass> {
        CardClass::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<CardClass> for CardClasses {
    fn from_iter<I: IntoIterator<Item = CardClass>>(iter: I) -> Self {
        let mut classes = Self::default();
        for class in iter {
            classes.insert(class);
        }
        classes
    }
}

/// Inline style and classes of one card.
///
/// `None` fields are cleared back to the stylesheet's value.
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub classes: CardClasses,
    /// Vertical translation in pixels.
    pub translate_y: Option<f64>,
    pub opacity: Option<f64>,
    pub z_index: Option<i32>,
    /// Length of an `all ... ease` transition, in milliseconds.
    pub transition_ms: Option<u32>,
    /// Whether the card receives pointer events.
    pub interactive: bool,
    /// Value of the `--stack-index` custom property.
    pub stack_index: Option<usize>,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            classes: CardClasses::default(),
            translate_y: None,
            opacity: None,
            z_index: None,
            transition_ms: None,
            interactive: true,
            stack_index: None,
        }
    }
}

impl CardStyle {
    pub fn transform_css(&self) -> Option<String> {
        self.translate_y
            .map(|y| format!("translateY({}px) scale(1)", y))
    }

    pub fn transition_css(&self) -> Option<String> {
        self.transition_ms.map(|ms| format!("all {}ms ease", ms))
    }

    pub fn opacity_css(&self) -> Option<String> {
        self.opacity.map(|o| o.to_string())
    }

    pub fn pointer_events_css(&self) -> &'static str {
        if self.interactive { "auto" } else { "none" }
    }

    /// Whether the card is currently drawn (not hidden behind the stack).
    pub fn is_visible(&self) -> bool {
        self.opacity.is_none_or(|o| o > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_set() {
        let mut classes = CardClasses::default();
        assert!(classes.is_empty());

        classes.insert(CardClass::Entering);
        classes.insert(CardClass::Stacked);
        classes.insert(CardClass::Stacked);
        assert!(classes.contains(CardClass::Stacked));
        assert!(!classes.contains(CardClass::Active));

        let names: Vec<_> = classes.iter().map(CardClass::as_str).collect();
        assert_eq!(names, vec!["stacked", "entering"]);

        classes.remove(CardClass::Stacked);
        assert_eq!(classes, [CardClass::Entering].into_iter().collect());
    }

    #[test]
    fn test_css_rendering() {
        let style = CardStyle {
            translate_y: Some(-15.0),
            opacity: Some(0.8),
            transition_ms: Some(600),
            ..Default::default()
        };
        assert_eq!(style.transform_css().as_deref(), Some("translateY(-15px) scale(1)"));
        assert_eq!(style.opacity_css().as_deref(), Some("0.8"));
        assert_eq!(style.transition_css().as_deref(), Some("all 600ms ease"));
        assert_eq!(style.pointer_events_css(), "auto");
    }

    #[test]
    fn test_cleared_style() {
        let style = CardStyle::default();
        assert!(style.transform_css().is_none());
        assert!(style.opacity_css().is_none());
        assert!(style.is_visible());
    }

    #[test]
    fn test_hidden_style() {
        let style = CardStyle {
            opacity: Some(0.0),
            interactive: false,
            ..Default::default()
        };
        assert!(!style.is_visible());
        assert_eq!(style.pointer_events_css(), "none");
    }
}
