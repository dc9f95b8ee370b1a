mod app;
mod event;
mod view;
mod widgets;

pub use app::{AppState, InputEvent, LoadState};
pub use event::map_crossterm_event_to_input_event;
pub use view::view;
pub use widgets::{DashboardWidget, FALLBACK_AVATAR, FALLBACK_BIOGRAPHY, MusicProfileCard};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc::Receiver;
use tokio::time::{Duration, interval};

/// Restores the terminal when the dashboard exits, panics included.
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the dashboard until the user quits.
///
/// `input_rx` carries the orchestrator's events (profile loaded/unavailable).
/// Key events come from a blocking reader thread, and a tick interval drives
/// the loading skeleton's pulse. When this returns, the dashboard has
/// unmounted: any in-flight fetch result is discarded by its sender.
pub async fn run_tui(mut input_rx: Receiver<InputEvent>) -> io::Result<()> {
    let _guard = TerminalGuard;
    crossterm::terminal::enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let mut state = AppState::new();

    // Internal channel for key events
    let (internal_tx, mut internal_rx) = tokio::sync::mpsc::channel::<InputEvent>(100);
    std::thread::spawn(move || {
        loop {
            if let Ok(event) = crossterm::event::read() {
                if let Some(event) = map_crossterm_event_to_input_event(event) {
                    if internal_tx.blocking_send(event).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut pulse_interval = interval(Duration::from_millis(100));
    terminal.draw(|f| view::view(f, &state))?;
    loop {
        let event = tokio::select! {
            Some(event) = input_rx.recv() => event,
            Some(event) = internal_rx.recv() => event,
            _ = pulse_interval.tick() => InputEvent::Tick,
        };
        if state.handle(event) {
            break;
        }
        terminal.draw(|f| view::view(f, &state))?;
    }
    Ok(())
}
