//! Typewriter loop.
//!
//! Types a word one character per tick, holds it, deletes it one character
//! per tick, then moves on to the next word, forever. Each tick reports the
//! delay until the next one, so the host reschedules a one-shot timer instead
//! of running a fixed-rate interval.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::apply_overrides;
use crate::error::{WidgetError, WidgetResult};

/// Opacity of the cursor in its dimmed phase.
pub const CURSOR_DIM_OPACITY: &str = "0.3";
/// Opacity of the cursor in its visible phase.
pub const CURSOR_FULL_OPACITY: &str = "1";

/// Words and cadence of a typing loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub words: Vec<String>,
    pub typing_speed_ms: u32,
    pub deleting_speed_ms: u32,
    /// Hold on a fully typed word.
    pub word_pause_ms: u32,
    /// Hold on empty text before the next word starts.
    pub next_word_pause_ms: u32,
    pub cursor_blink_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            words: [
                "PASSION",
                "PROTECTION",
                "SAFETY",
                "EXCELLENCE",
                "RELIABILITY",
                "INNOVATION",
                "COMMITMENT",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            typing_speed_ms: 100,
            deleting_speed_ms: 60,
            word_pause_ms: 1500,
            next_word_pause_ms: 500,
            cursor_blink_ms: 500,
        }
    }
}

impl TypingConfig {
    /// Defaults with a JSON object of overrides applied.
    pub fn from_overrides(overrides: &str) -> WidgetResult<Self> {
        apply_overrides(&Self::default(), overrides)
    }

    /// Build a config from the optional JSON override object and the
    /// optional JSON word array found on the text element. Blank attributes
    /// are ignored; the word array wins over any `words` in the object.
    pub fn from_attributes(overrides: Option<&str>, words: Option<&str>) -> WidgetResult<Self> {
        let mut config = match overrides.filter(|json| !json.trim().is_empty()) {
            Some(json) => Self::from_overrides(json)?,
            None => Self::default(),
        };
        if let Some(json) = words.filter(|json| !json.trim().is_empty()) {
            config.words = serde_json::from_str(json)?;
        }
        Ok(config)
    }

    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms.into())
    }
}

/// Outcome of one typing tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingTick {
    /// Text to render.
    pub text: String,
    /// Delay until the next tick.
    pub delay: Duration,
}

/// State of a typing loop.
#[derive(Debug, Clone)]
pub struct TypingLoop {
    config: TypingConfig,
    word_index: usize,
    /// Characters of the current word shown.
    char_index: usize,
    deleting: bool,
}

impl TypingLoop {
    /// Start on the first word with empty text.
    pub fn new(config: TypingConfig) -> WidgetResult<Self> {
        if config.words.is_empty() {
            return Err(WidgetError::EmptyWordList);
        }
        Ok(Self {
            config,
            word_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn current_word(&self) -> &str {
        &self.config.words[self.word_index]
    }

    /// Currently rendered prefix of the current word.
    pub fn text(&self) -> String {
        self.current_word().chars().take(self.char_index).collect()
    }

    /// Type or delete one character and pick the next delay.
    pub fn tick(&mut self) -> TypingTick {
        let len = self.current_word().chars().count();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }
        let text = self.text();

        let delay_ms = if !self.deleting && self.char_index == len {
            self.deleting = true;
            self.config.word_pause_ms
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.word_index = (self.word_index + 1) % self.config.words.len();
            log::debug!("typing loop -> word {}", self.word_index);
            self.config.next_word_pause_ms
        } else if self.deleting {
            self.config.deleting_speed_ms
        } else {
            self.config.typing_speed_ms
        };

        TypingTick {
            text,
            delay: Duration::from_millis(delay_ms.into()),
        }
    }
}

/// Blinking cursor, toggled by a fixed-rate timer.
#[derive(Debug, Clone, Default)]
pub struct CursorBlink {
    dimmed: bool,
}

impl CursorBlink {
    /// Resume from an inline opacity value (empty when unset).
    pub fn from_opacity(opacity: &str) -> Self {
        Self {
            dimmed: opacity.trim() == CURSOR_DIM_OPACITY,
        }
    }

    pub fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    /// Flip the cursor and return the opacity to write.
    pub fn toggle(&mut self) -> &'static str {
        self.dimmed = !self.dimmed;
        if self.dimmed {
            CURSOR_DIM_OPACITY
        } else {
            CURSOR_FULL_OPACITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn words(list: &[&str]) -> TypingConfig {
        TypingConfig {
            words: list.iter().map(|w| w.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_word_list_rejected() {
        assert!(matches!(
            TypingLoop::new(words(&[])),
            Err(WidgetError::EmptyWordList)
        ));
    }

    #[test]
    fn test_passion_cycle() {
        let mut typing = TypingLoop::new(TypingConfig::default()).unwrap();
        assert_eq!(typing.text(), "");

        let mut last = None;
        for _ in 0..7 {
            last = Some(typing.tick());
        }
        let last = last.unwrap();
        assert_eq!(last.text, "PASSION");
        assert_eq!(last.delay, ms(1500));
        assert!(typing.is_deleting());

        let mut last = None;
        for _ in 0..7 {
            last = Some(typing.tick());
        }
        let last = last.unwrap();
        assert_eq!(last.text, "");
        assert_eq!(last.delay, ms(500));
        assert_eq!(typing.word_index(), 1);
        assert!(!typing.is_deleting());
    }

    #[test]
    fn test_intermediate_frames() {
        let mut typing = TypingLoop::new(words(&["ABC"])).unwrap();
        let frames: Vec<_> = (0..6).map(|_| typing.tick()).collect();
        let texts: Vec<_> = frames.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "AB", "ABC", "AB", "A", ""]);

        let delays: Vec<_> = frames.iter().map(|t| t.delay).collect();
        assert_eq!(
            delays,
            vec![ms(100), ms(100), ms(1500), ms(60), ms(60), ms(500)]
        );
    }

    #[test]
    fn test_word_index_wraps() {
        let mut typing = TypingLoop::new(words(&["AB", "C"])).unwrap();
        for _ in 0..4 {
            typing.tick();
        }
        assert_eq!(typing.word_index(), 1);
        for _ in 0..2 {
            typing.tick();
        }
        assert_eq!(typing.word_index(), 0);
    }

    #[test]
    fn test_char_index_bounded() {
        let mut typing = TypingLoop::new(TypingConfig::default()).unwrap();
        for _ in 0..500 {
            typing.tick();
            assert!(typing.char_index() <= typing.current_word().chars().count());
        }
    }

    #[test]
    fn test_multibyte_words() {
        let mut typing = TypingLoop::new(words(&["ÉLAN"])).unwrap();
        assert_eq!(typing.tick().text, "É");
        assert_eq!(typing.tick().text, "ÉL");
    }

    #[test]
    fn test_empty_word_skipped() {
        let mut typing = TypingLoop::new(words(&["", "GO"])).unwrap();
        let first = typing.tick();
        assert_eq!(first.text, "");
        assert_eq!(first.delay, ms(1500));
        let second = typing.tick();
        assert_eq!(second.text, "");
        assert_eq!(typing.word_index(), 1);
        assert_eq!(typing.tick().text, "G");
    }

    #[test]
    fn test_words_from_attribute() {
        let config = TypingConfig::from_attributes(None, Some(r#"["ONE", "TWO"]"#)).unwrap();
        assert_eq!(config.words, vec!["ONE", "TWO"]);
        assert_eq!(config.typing_speed_ms, 100);

        let config = TypingConfig::from_attributes(None, Some("  ")).unwrap();
        assert_eq!(config.words.len(), 7);

        assert!(TypingConfig::from_attributes(None, Some("ONE, TWO")).is_err());
    }

    #[test]
    fn test_config_overrides() {
        let config = TypingConfig::from_overrides(r#"{"deleting_speed_ms": 30}"#).unwrap();
        assert_eq!(config.deleting_speed_ms, 30);
        assert_eq!(config.words.len(), 7);

        let config = TypingConfig::from_attributes(
            Some(r#"{"typing_speed_ms": 80, "words": ["A"]}"#),
            Some(r#"["B", "C"]"#),
        )
        .unwrap();
        assert_eq!(config.typing_speed_ms, 80);
        assert_eq!(config.words, vec!["B", "C"]);

        assert!(TypingConfig::from_attributes(Some(r#"{"speed": 1}"#), None).is_err());
    }

    #[test]
    fn test_cursor_blink() {
        let mut cursor = CursorBlink::default();
        assert_eq!(cursor.toggle(), "0.3");
        assert_eq!(cursor.toggle(), "1");
        assert_eq!(cursor.toggle(), "0.3");

        let mut cursor = CursorBlink::from_opacity("0.3");
        assert!(cursor.is_dimmed());
        assert_eq!(cursor.toggle(), "1");
    }
}
