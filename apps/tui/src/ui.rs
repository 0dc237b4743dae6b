//! Frame rendering: header, quote rows and a status footer.
//!
//! Left columns sit at fixed offsets; price and variation are anchored to the
//! right margin so they follow the terminal width.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    Frame,
};
use tuimarket_core::constants::HEADER_ROWS;
use tuimarket_core::{visible_rows, QuoteFields, RefreshStatus};

use crate::app::App;

const COL_TICKER: u16 = 2;
const COL_NAME: u16 = 11;
const PRICE_FROM_RIGHT: u16 = 29;
const VARIATION_FROM_RIGHT: u16 = 18;

const KEY_HINTS: &str = " q quit  j/k scroll";

/// Draw one frame from fresh record snapshots
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    draw_header(buf, area);
    draw_rows(buf, area, app);
    draw_footer(buf, area, &app.watchlist.status());
}

fn draw_header(buf: &mut Buffer, area: Rect) {
    if area.height == 0 {
        return;
    }
    let style = Style::default().fg(Color::Black).bg(Color::White);
    let y = area.top();
    buf.set_style(Rect::new(area.left(), y, area.width, 1), style);

    let (price_x, variation_x) = right_columns(area);
    put(buf, area, 0, y, " Symbol", usize::from(COL_NAME - 2), style);
    put(buf, area, COL_NAME - 2, y, "| Name", gap(COL_NAME - 2, price_x.saturating_sub(2)), style);
    put(buf, area, price_x.saturating_sub(2), y, "| Price", gap(price_x, variation_x), style);
    put(buf, area, variation_x.saturating_sub(2), y, "| Variation", usize::MAX, style);
}

fn draw_rows(buf: &mut Buffer, area: Rect, app: &App) {
    let records = app.watchlist.records();
    let rows = visible_rows(area.height);
    let (price_x, variation_x) = right_columns(area);

    for (line, index) in app.view.window(records.len(), rows).enumerate() {
        let record = &records[index];
        let fields = record.snapshot();
        let y = area.top() + HEADER_ROWS + line as u16;
        let plain = Style::default();

        put(buf, area, COL_TICKER, y, record.ticker(), gap(COL_TICKER, COL_NAME), plain);
        put(buf, area, COL_NAME, y, &fields.display_name, gap(COL_NAME, price_x), plain);
        put(
            buf,
            area,
            price_x,
            y,
            &format!("{:.2}", fields.price),
            gap(price_x, variation_x),
            plain,
        );

        let (variation, style) = variation_cell(&fields);
        put(buf, area, variation_x, y, &variation, usize::MAX, style);
    }
}

/// Change block and its colour. A zero previous close has no percentage.
fn variation_cell(fields: &QuoteFields) -> (String, Style) {
    match fields.change_percent() {
        Some(percent) => {
            let color = if fields.is_gain() {
                Color::Green
            } else {
                Color::Red
            };
            (
                format!("{:+.2} ({:+.2}%)", fields.change(), percent),
                Style::default().fg(color),
            )
        }
        None => ("--".to_string(), Style::default()),
    }
}

fn draw_footer(buf: &mut Buffer, area: Rect, status: &RefreshStatus) {
    // the header takes precedence on a one-line terminal
    if area.height <= HEADER_ROWS {
        return;
    }
    let y = area.bottom() - 1;
    let hint_style = Style::default().fg(Color::DarkGray);
    put(buf, area, area.left(), y, KEY_HINTS, usize::MAX, hint_style);

    let (text, style) = status_text(status);
    let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let x = area
        .right()
        .saturating_sub(len.saturating_add(1))
        .max(area.left());
    put(buf, area, x, y, &text, usize::MAX, style);
}

fn status_text(status: &RefreshStatus) -> (String, Style) {
    if let Some(error) = &status.last_error {
        return (
            format!("Fetch failed: {}", error),
            Style::default().fg(Color::Red),
        );
    }
    match status.last_success {
        Some(at) if status.failed_symbols > 0 => (
            format!("{} ({} failed)", updated(at), status.failed_symbols),
            Style::default().fg(Color::Yellow),
        ),
        Some(at) => (updated(at), Style::default()),
        None => (
            "Waiting for data…".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

fn updated(at: DateTime<Local>) -> String {
    format!("Updated {}", at.format("%H:%M:%S"))
}

/// Price and variation columns for this width.
fn right_columns(area: Rect) -> (u16, u16) {
    (
        area.right().saturating_sub(PRICE_FROM_RIGHT),
        area.right().saturating_sub(VARIATION_FROM_RIGHT),
    )
}

/// Width available from `x` up to one cell before `next`.
fn gap(x: u16, next: u16) -> usize {
    usize::from(next.saturating_sub(x).saturating_sub(1))
}

/// Write clipped text, ignoring anything that falls outside the frame.
fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, max_width: usize, style: Style) {
    if y >= area.bottom() || x >= area.right() || max_width == 0 {
        return;
    }
    buf.set_stringn(x, y, text, max_width, style);
}
