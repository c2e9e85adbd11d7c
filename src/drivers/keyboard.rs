use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Cleans up raw key events before they reach the menus.
///
/// Only presses are forwarded: menus navigate on key down and a release or
/// auto-repeat of Esc would otherwise close two levels at once on terminals
/// that report them.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat if key.code == KeyCode::Esc => return None,
            KeyEventKind::Repeat | KeyEventKind::Press => {}
        }
        if key.code == KeyCode::Esc {
            if self.esc_down && cfg!(windows) {
                return None;
            }
            self.esc_down = true;
        } else {
            self.esc_down = false;
        }
        key.kind = KeyEventKind::Press;
        Some(Event::Key(key))
    }
}
