//! Dashboard application state.

use std::sync::Arc;

use tuimarket_core::{ViewState, Watchlist};

/// Actions the app can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    ScrollUp,
    ScrollDown,
    None,
}

pub struct App {
    /// Whether the app should quit
    pub should_quit: bool,

    /// Shared with the refresh loop, which is its only writer
    pub watchlist: Arc<Watchlist>,

    pub view: ViewState,
}

impl App {
    pub fn new(watchlist: Arc<Watchlist>) -> Self {
        Self {
            should_quit: false,
            watchlist,
            view: ViewState::new(),
        }
    }

    /// Apply an action given the number of table rows currently on screen.
    pub fn handle_action(&mut self, action: AppAction, rows: usize) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::ScrollUp => self.view.scroll_up(),
            AppAction::ScrollDown => self.view.scroll_down(self.watchlist.len(), rows),
            AppAction::None => {}
        }
    }

    /// Re-fit the scroll offset to the current terminal height.
    pub fn fit_to(&mut self, rows: usize) {
        self.view.clamp(self.watchlist.len(), rows);
    }
}
