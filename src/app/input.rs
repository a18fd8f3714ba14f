use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};
use crate::keymap;
use crate::viewer::Region;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            Event::FocusGained => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: &KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        // Quit
        match key.code {
            KeyCode::Char('q') if plain => return Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::Quit);
            }
            _ => {}
        }

        // Picker navigation shadows the plain paging keys while it is shown.
        if model.viewer.layout().active() == Region::Picker {
            let nav = match key.code {
                KeyCode::Char('j') | KeyCode::Down if plain => Some(Message::PickerDown),
                KeyCode::Char('k') | KeyCode::Up if plain => Some(Message::PickerUp),
                KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right if plain => {
                    Some(Message::PickerConfirm)
                }
                KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left if plain => {
                    Some(Message::PickerParent)
                }
                KeyCode::Esc => Some(Message::TogglePicker),
                _ => None,
            };
            if nav.is_some() {
                return nav;
            }
        }

        if let Some(intent) = keymap::resolve(key) {
            return Some(intent.into());
        }

        if !plain {
            return None;
        }
        match key.code {
            KeyCode::Down | KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') => {
                Some(Message::NextPage)
            }
            KeyCode::Up | KeyCode::Left | KeyCode::PageUp => Some(Message::PrevPage),
            _ => None,
        }
    }
}
