//! Scroll state and visible-window computation.
//!
//! All methods take the current watchlist length and terminal height rather
//! than caching them, so a resize between frames is picked up by the next
//! [`ViewState::clamp`].

use std::ops::Range;

use crate::constants::{FOOTER_ROWS, HEADER_ROWS};

/// Number of table rows available at a given terminal height.
pub fn visible_rows(height: u16) -> usize {
    height.saturating_sub(HEADER_ROWS + FOOTER_ROWS) as usize
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    scroll_offset: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Largest offset that still keeps the view filled.
    ///
    /// With no room for rows at all the last record is still reachable, so a
    /// zero-row view is treated as one row.
    pub fn max_scroll(len: usize, rows: usize) -> usize {
        len.saturating_sub(rows.max(1))
    }

    /// Whether the last record is already on screen.
    pub fn is_at_bottom(&self, len: usize, rows: usize) -> bool {
        self.scroll_offset >= Self::max_scroll(len, rows)
    }

    /// Scroll one row down unless the last record is visible.
    pub fn scroll_down(&mut self, len: usize, rows: usize) {
        if !self.is_at_bottom(len, rows) {
            self.scroll_offset += 1;
        }
    }

    /// Scroll one row up unless already at the top.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Pull the offset back in range after the list or terminal changed.
    pub fn clamp(&mut self, len: usize, rows: usize) {
        self.scroll_offset = self.scroll_offset.min(Self::max_scroll(len, rows));
    }

    /// Indices of the records to draw this frame.
    pub fn window(&self, len: usize, rows: usize) -> Range<usize> {
        let start = self.scroll_offset.min(len);
        let end = len.min(start + rows);
        start..end
    }
}
