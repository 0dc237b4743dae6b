//! Field extraction from raw batch quote payloads.
//!
//! Extraction is deliberately a substring scrape rather than a schema parse:
//! each field is located by its key marker and copied up to a terminator.
//! Every search is bounded to the requested ticker's own record (see
//! [`record`]), so one symbol can never pick up another symbol's values.
//!
//! | Field          | Marker                          | Terminator  | Max |
//! |----------------|---------------------------------|-------------|-----|
//! | price          | `"regularMarketPrice":`         | `,` or `}`  | 64  |
//! | previous close | `"regularMarketPreviousClose":` | `,` or `}`  | 64  |
//! | market state   | `"marketState":"`               | `"`         | 128 |
//! | display name   | `"shortName":"`                 | `"`         | 256 |

mod number;
mod record;

use crate::errors::{ExtractError, QuoteField};
use crate::models::QuoteFields;

use number::parse_lenient_f64;
use record::find_record;

const PRICE_MARKER: &str = "\"regularMarketPrice\":";
const PREVIOUS_CLOSE_MARKER: &str = "\"regularMarketPreviousClose\":";
const MARKET_STATE_MARKER: &str = "\"marketState\":\"";
const DISPLAY_NAME_MARKER: &str = "\"shortName\":\"";

const NUMBER_TERMINATORS: &[char] = &[',', '}'];
const STRING_TERMINATORS: &[char] = &['"'];

/// Maximum length of a numeric value
pub const MAX_NUMBER_LEN: usize = 64;
/// Maximum length of a market state label
pub const MAX_STATE_LEN: usize = 128;
/// Maximum length of a display name
pub const MAX_NAME_LEN: usize = 256;

/// Extracts the four quote fields for `ticker` from a raw batch payload.
///
/// Fails if the ticker has no record in the payload, if any marker is missing
/// from that record, if a value is unterminated or too long, or if a numeric
/// value has no leading number. The function is pure: the same payload and
/// ticker always produce the same result.
pub fn extract(raw: &[u8], ticker: &str) -> Result<QuoteFields, ExtractError> {
    let text = String::from_utf8_lossy(raw);
    let record = find_record(&text, ticker)
        .ok_or_else(|| ExtractError::SymbolNotFound(ticker.to_string()))?;

    let price = extract_number(record, ticker, QuoteField::Price, PRICE_MARKER)?;
    let previous_close = extract_number(
        record,
        ticker,
        QuoteField::PreviousClose,
        PREVIOUS_CLOSE_MARKER,
    )?;
    let market_state = find_copy(
        record,
        ticker,
        QuoteField::MarketState,
        MARKET_STATE_MARKER,
        STRING_TERMINATORS,
        MAX_STATE_LEN,
    )?;
    let display_name = find_copy(
        record,
        ticker,
        QuoteField::DisplayName,
        DISPLAY_NAME_MARKER,
        STRING_TERMINATORS,
        MAX_NAME_LEN,
    )?;

    Ok(QuoteFields {
        display_name: unescape(display_name),
        market_state: market_state.to_string(),
        price,
        previous_close,
    })
}

fn extract_number(
    record: &str,
    ticker: &str,
    field: QuoteField,
    marker: &str,
) -> Result<f64, ExtractError> {
    let value = find_copy(
        record,
        ticker,
        field,
        marker,
        NUMBER_TERMINATORS,
        MAX_NUMBER_LEN,
    )?;
    parse_lenient_f64(value).ok_or_else(|| ExtractError::InvalidNumber {
        ticker: ticker.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Returns the text between `marker` and the first terminator after it.
fn find_copy<'a>(
    record: &'a str,
    ticker: &str,
    field: QuoteField,
    marker: &str,
    terminators: &[char],
    max_len: usize,
) -> Result<&'a str, ExtractError> {
    let start = record
        .find(marker)
        .map(|pos| pos + marker.len())
        .ok_or_else(|| ExtractError::MissingField {
            ticker: ticker.to_string(),
            field,
        })?;

    let rest = &record[start..];
    match rest.find(terminators) {
        Some(end) if end <= max_len => Ok(&rest[..end]),
        _ => Err(ExtractError::ValueTooLong {
            ticker: ticker.to_string(),
            field,
            max: max_len,
        }),
    }
}

/// Decodes the JSON escapes that survive a scrape up to the closing quote.
///
/// `\"` never appears here because the scrape stops at the first quote.
/// Unknown or malformed escapes are kept verbatim.
fn unescape(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') | Some('t') | Some('r') => out.push(' '),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
