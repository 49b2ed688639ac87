//! Card deck presets and tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::apply_overrides;
use crate::error::WidgetResult;

/// Named parameter sets shipped with the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckPreset {
    /// Quick 600ms swaps over a visibly fanned stack.
    #[default]
    Stacking,
    /// Slower 800ms swaps over a tight stack.
    Classic,
}

impl DeckPreset {
    /// Parse a preset name as written in markup.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "stacking" => Some(Self::Stacking),
            "classic" => Some(Self::Classic),
            _ => None,
        }
    }

    pub fn config(self) -> DeckConfig {
        match self {
            Self::Stacking => DeckConfig::stacking(),
            Self::Classic => DeckConfig::classic(),
        }
    }
}

/// Tuning for one card deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Length of one card swap.
    pub animation_duration_ms: u32,
    /// Vertical step between stacked cards, in pixels.
    pub stack_offset_step: f64,
    /// Fraction of the drag distance applied to the active card.
    pub drag_damping: f64,
    /// Drag distance at which the active card would be fully faded.
    pub drag_fade_divisor: f64,
    /// Maximum drag displacement of the active card, in pixels.
    pub drag_max_offset: f64,
    /// Drag distance below which no visual feedback is applied.
    pub drag_feedback_min: f64,
    /// Drag distance needed to commit to a card change.
    pub drag_threshold: f64,
    /// Period of the autoplay timer.
    pub autoplay_interval_ms: u32,
    /// Delay before autoplay first starts after mounting.
    pub autoplay_start_delay_ms: u32,
    /// Delay before autoplay restarts after a drag.
    pub autoplay_cooldown_ms: u32,
    /// Number of cards shown behind the active one.
    pub visible_stack_count: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::stacking()
    }
}

impl DeckConfig {
    pub fn stacking() -> Self {
        Self {
            animation_duration_ms: 600,
            stack_offset_step: 5.0,
            drag_damping: 0.2,
            drag_fade_divisor: 300.0,
            drag_max_offset: 30.0,
            drag_feedback_min: 10.0,
            drag_threshold: 50.0,
            autoplay_interval_ms: 4000,
            autoplay_start_delay_ms: 1000,
            autoplay_cooldown_ms: 1000,
            visible_stack_count: 4,
        }
    }

    pub fn classic() -> Self {
        Self {
            animation_duration_ms: 800,
            stack_offset_step: 1.0,
            ..Self::stacking()
        }
    }

    /// Config of the named preset. Unknown names fall back to the default.
    pub fn for_preset_name(preset: Option<&str>) -> Self {
        match preset {
            Some(name) => DeckPreset::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown deck preset {:?}, using stacking", name);
                DeckPreset::default()
            }),
            None => DeckPreset::default(),
        }
        .config()
    }

    /// Build a config from an optional preset name and JSON overrides.
    pub fn from_attributes(preset: Option<&str>, overrides: Option<&str>) -> WidgetResult<Self> {
        let base = Self::for_preset_name(preset);
        match overrides {
            Some(json) if !json.trim().is_empty() => apply_overrides(&base, json),
            _ => Ok(base),
        }
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms.into())
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms.into())
    }

    pub fn autoplay_start_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_start_delay_ms.into())
    }

    pub fn autoplay_cooldown(&self) -> Duration {
        Duration::from_millis(self.autoplay_cooldown_ms.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_timing_and_step() {
        let stacking = DeckConfig::stacking();
        let classic = DeckConfig::classic();

        assert_eq!(stacking.animation_duration_ms, 600);
        assert_eq!(classic.animation_duration_ms, 800);
        assert!((stacking.stack_offset_step - 5.0).abs() < f64::EPSILON);
        assert!((classic.stack_offset_step - 1.0).abs() < f64::EPSILON);

        let realigned = DeckConfig {
            animation_duration_ms: 600,
            stack_offset_step: 5.0,
            ..classic
        };
        assert_eq!(realigned, stacking);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(DeckPreset::from_name("classic"), Some(DeckPreset::Classic));
        assert_eq!(DeckPreset::from_name(" stacking "), Some(DeckPreset::Stacking));
        assert_eq!(DeckPreset::from_name("fancy"), None);
    }

    #[test]
    fn test_from_attributes() {
        let config = DeckConfig::from_attributes(None, None).unwrap();
        assert_eq!(config, DeckConfig::stacking());

        let config = DeckConfig::from_attributes(Some("classic"), None).unwrap();
        assert_eq!(config, DeckConfig::classic());

        let config = DeckConfig::from_attributes(Some("unknown"), None).unwrap();
        assert_eq!(config, DeckConfig::stacking());
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let config =
            DeckConfig::from_attributes(Some("classic"), Some(r#"{"visible_stack_count": 2}"#))
                .unwrap();
        assert_eq!(config.visible_stack_count, 2);
        assert_eq!(config.animation_duration_ms, 800);
    }

    #[test]
    fn test_bad_overrides() {
        assert!(DeckConfig::from_attributes(None, Some("{oops")).is_err());
        assert!(DeckConfig::from_attributes(None, Some("   ")).is_ok());
    }

    #[test]
    fn test_durations() {
        let config = DeckConfig::stacking();
        assert_eq!(config.animation_duration(), Duration::from_millis(600));
        assert_eq!(config.autoplay_interval(), Duration::from_secs(4));
    }
}
