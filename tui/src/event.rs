use crate::app::InputEvent;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

pub fn map_crossterm_event_to_input_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return None;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn quit_keys_map_to_quit() {
        for event in [
            press(KeyCode::Char('q'), KeyModifiers::NONE),
            press(KeyCode::Esc, KeyModifiers::NONE),
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(
                map_crossterm_event_to_input_event(event),
                Some(InputEvent::Quit)
            );
        }
    }

    #[test]
    fn other_keys_are_ignored() {
        let event = press(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(map_crossterm_event_to_input_event(event), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_crossterm_event_to_input_event(event), None);
    }
}
