//! Market data models
//!
//! - `quote` - The scraped per-symbol field group (QuoteFields)

mod quote;

pub use quote::QuoteFields;
