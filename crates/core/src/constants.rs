/// Seconds between two refresh cycles
pub const DEFAULT_REFRESH_PERIOD_SECS: u64 = 5;

/// Rows reserved above the table for the column titles
pub const HEADER_ROWS: u16 = 1;

/// Rows reserved below the table for the status line
pub const FOOTER_ROWS: u16 = 1;

/// Watchlist file locations, relative to the home directory, in search order
pub const SYMBOL_FILE_CANDIDATES: [&str; 3] = [
    ".config/tuimarket/symbols",
    ".tuimarket/symbols",
    ".tuimarket_symbols",
];
