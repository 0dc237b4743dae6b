//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `Transport` and `QuoteFetcher` traits
//! - The Yahoo Finance batch fetcher and its authenticated HTTP session

mod traits;

pub mod yahoo;

// Re-exports
pub use traits::{QuoteFetcher, Transport};
