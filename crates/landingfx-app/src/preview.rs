//! Native preview: replays a widget on a simulated clock and logs what the
//! page would show.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use kurbo::Rect;
use landingfx_core::{
    CardDeck, CursorBlink, DeckConfig, DeckOutput, DeckReplay, Switcher, SwitcherLayout,
    Timeline, TypingConfig, TypingLoop, WidgetResult,
};

const PREVIEW_CARDS: usize = 5;

/// Widget replayed by the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewMode {
    /// Card deck with the stacking preset
    Deck,
    /// Card deck with the classic preset
    DeckClassic,
    /// Typewriter loop
    Typing,
    /// Pill switcher
    Switcher,
}

/// Command line of the preview binary.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "landingfx",
    about = "Replay a landing page widget on a simulated clock"
)]
pub struct PreviewArgs {
    /// Widget to replay
    #[arg(value_enum, default_value = "deck")]
    pub mode: PreviewMode,
    /// Simulated run length in milliseconds
    #[arg(long, default_value_t = 20_000)]
    pub millis: u64,
}

/// Run the preview described by `args`.
pub fn run_preview(args: &PreviewArgs) -> WidgetResult<()> {
    let run_for = Duration::from_millis(args.millis);
    match args.mode {
        PreviewMode::Deck => preview_deck(DeckConfig::stacking(), run_for),
        PreviewMode::DeckClassic => preview_deck(DeckConfig::classic(), run_for),
        PreviewMode::Typing => preview_typing(run_for),
        PreviewMode::Switcher => {
            preview_switcher();
            Ok(())
        }
    }
}

fn log_deck(at: Duration, deck: &CardDeck, out: &DeckOutput) {
    if out.restyled.is_empty() {
        return;
    }
    log::info!(
        "{:>6}ms  active {}  {:?}  restyled {:?}",
        at.as_millis(),
        deck.active_index(),
        deck.phase(),
        out.restyled
    );
}

fn preview_deck(config: DeckConfig, run_for: Duration) -> WidgetResult<()> {
    let mut replay = DeckReplay::new(CardDeck::new(PREVIEW_CARDS, config)?);

    // Halfway through, swipe up past the threshold.
    let swipe_at = run_for / 2;
    replay.advance(swipe_at, log_deck);

    log::info!("{:>6}ms  swipe up 60px", replay.now().as_millis());
    replay.dispatch(|deck| deck.pointer_down(400.0));
    replay.dispatch(|deck| deck.pointer_move(370.0));
    let out = replay.dispatch(|deck| deck.pointer_up(340.0));
    log_deck(replay.now(), replay.deck(), &out);

    replay.advance(run_for - swipe_at, log_deck);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum TypingEvent {
    Step,
    Blink,
}

fn preview_typing(run_for: Duration) -> WidgetResult<()> {
    let config = TypingConfig::default();
    let blink_period = config.cursor_blink();
    let mut typing = TypingLoop::new(config)?;
    let mut cursor = CursorBlink::default();
    let mut timeline = Timeline::new();

    timeline.schedule(Duration::ZERO, TypingEvent::Step);
    timeline.schedule_every(blink_period, TypingEvent::Blink);

    while let Some((_, event)) = timeline.fire_next(run_for) {
        match event {
            TypingEvent::Step => {
                let tick = typing.tick();
                log::info!("{:>6}ms  {:?}", timeline.now().as_millis(), tick.text);
                timeline.schedule(tick.delay, TypingEvent::Step);
            }
            TypingEvent::Blink => {
                log::debug!(
                    "{:>6}ms  cursor opacity {}",
                    timeline.now().as_millis(),
                    cursor.toggle()
                );
            }
        }
    }
    Ok(())
}

/// Three 68px options in a row, starting 4px into the container.
struct FixedLayout;

impl SwitcherLayout for FixedLayout {
    fn container_rect(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 212.0, 40.0))
    }

    fn option_rect(&self, index: usize) -> Option<Rect> {
        (index < 3).then(|| {
            let x0 = 4.0 + 68.0 * index as f64;
            Rect::new(x0, 4.0, x0 + 68.0, 36.0)
        })
    }
}

fn preview_switcher() {
    let mut switcher = Switcher::new(3, Some(0));
    for index in [0, 2, 1, 1, 0] {
        switcher.select(index);
        if let Some(style) = switcher.place(&FixedLayout, index) {
            let props: Vec<String> = style
                .properties()
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect();
            log::info!("option {}  {}", index, props.join("; "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<PreviewArgs, clap::Error> {
        PreviewArgs::try_parse_from(std::iter::once("landingfx").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.mode, PreviewMode::Deck);
        assert_eq!(parsed.millis, 20_000);
    }

    #[test]
    fn test_parse_mode_and_millis() {
        let parsed = args(&["typing", "--millis", "3000"]).unwrap();
        assert_eq!(parsed.mode, PreviewMode::Typing);
        assert_eq!(parsed.millis, 3000);

        let parsed = args(&["--millis=10", "deck-classic"]).unwrap();
        assert_eq!(parsed.mode, PreviewMode::DeckClassic);
        assert_eq!(parsed.millis, 10);
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--millis"]).is_err());
        assert!(args(&["--millis", "soon"]).is_err());
        assert!(args(&["carousel"]).is_err());
    }

    #[test]
    fn test_help_is_available() {
        let err = args(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--millis"));
    }

    #[test]
    fn test_previews_run() {
        for mode in [
            PreviewMode::Deck,
            PreviewMode::DeckClassic,
            PreviewMode::Typing,
            PreviewMode::Switcher,
        ] {
            run_preview(&PreviewArgs { mode, millis: 12_000 }).unwrap();
        }
    }
}
