//! Input event handling for the dashboard

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};

use crate::app::AppAction;

/// Events that can occur in the TUI
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// No input within one tick; redraw with fresh data
    Tick,
}

/// Handles input events from the terminal
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait up to one tick for the next event
    pub fn next_event(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // key releases and repeats are reported on some platforms
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }

    /// Convert a key event to an app action
    pub fn key_to_action(key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppAction::Quit,
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => AppAction::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => AppAction::ScrollDown,
            _ => AppAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Char('q'))), AppAction::Quit);
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Esc)), AppAction::Quit);
        assert_eq!(
            EventHandler::key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppAction::Quit
        );
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Down)), AppAction::ScrollDown);
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Char('j'))), AppAction::ScrollDown);
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Up)), AppAction::ScrollUp);
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Char('k'))), AppAction::ScrollUp);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Char('c'))), AppAction::None);
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Enter)), AppAction::None);
        assert_eq!(EventHandler::key_to_action(key(KeyCode::Char('Q'))), AppAction::None);
    }
}
