//! Property-based tests for quote field extraction.
//!
//! Payloads are generated with `serde_json` in the shape of a Yahoo v7 batch
//! response, so every generated input is a realistic, well-formed document.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use tuimarket_market_data::{extract, ExtractError, QuoteFields};

// =============================================================================
// Generators
// =============================================================================

fn arb_ticker() -> impl Strategy<Value = String> {
    "[A-Z]{1,5}(\\.[A-Z]{1,2})?"
}

fn arb_fields() -> impl Strategy<Value = QuoteFields> {
    (
        "[A-Za-z0-9 .,&()-]{0,40}",
        prop_oneof![
            Just("REGULAR".to_string()),
            Just("CLOSED".to_string()),
            Just("PRE".to_string()),
            Just("POST".to_string()),
        ],
        -1.0e6f64..1.0e6,
        0.0f64..1.0e6,
    )
        .prop_map(|(display_name, market_state, price, previous_close)| QuoteFields {
            display_name,
            market_state,
            price,
            previous_close,
        })
}

fn record(ticker: &str, fields: &QuoteFields) -> Value {
    json!({
        "language": "en-US",
        "quoteType": "EQUITY",
        "regularMarketPrice": fields.price,
        "regularMarketPreviousClose": fields.previous_close,
        "marketState": fields.market_state,
        "shortName": fields.display_name,
        "symbol": ticker,
    })
}

fn batch(records: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "quoteResponse": { "result": records, "error": null }
    }))
    .unwrap()
}

const FIELD_KEYS: [&str; 4] = [
    "regularMarketPrice",
    "regularMarketPreviousClose",
    "marketState",
    "shortName",
];

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Well-formed records yield exactly the values they were built from.
    #[test]
    fn prop_extracts_exact_values(ticker in arb_ticker(), fields in arb_fields()) {
        let raw = batch(vec![record(&ticker, &fields)]);
        let extracted = extract(&raw, &ticker).unwrap();
        prop_assert_eq!(extracted, fields);
    }

    /// Every ticker in a batch reads its own record and nobody else's.
    #[test]
    fn prop_batch_records_are_isolated(
        entries in proptest::collection::hash_map(arb_ticker(), arb_fields(), 1..6)
    ) {
        let entries: HashMap<String, QuoteFields> = entries;
        let raw = batch(entries.iter().map(|(t, f)| record(t, f)).collect());
        for (ticker, fields) in &entries {
            prop_assert_eq!(&extract(&raw, ticker).unwrap(), fields);
        }
    }

    /// Removing any one of the four field markers makes extraction fail.
    #[test]
    fn prop_missing_marker_fails(
        ticker in arb_ticker(),
        fields in arb_fields(),
        missing in 0usize..4,
    ) {
        let mut rec = record(&ticker, &fields);
        rec.as_object_mut().unwrap().remove(FIELD_KEYS[missing]);
        let raw = batch(vec![rec]);
        let is_missing_field = matches!(
            extract(&raw, &ticker),
            Err(ExtractError::MissingField { .. })
        );
        prop_assert!(is_missing_field);
    }

    /// A marker missing from one record is never satisfied by a later record.
    #[test]
    fn prop_missing_marker_not_borrowed(
        fields in arb_fields(),
        other in arb_fields(),
        missing in 0usize..4,
    ) {
        let mut first = record("AAA", &fields);
        first.as_object_mut().unwrap().remove(FIELD_KEYS[missing]);
        let raw = batch(vec![first, record("BBB", &other)]);
        prop_assert!(extract(&raw, "AAA").is_err());
        prop_assert_eq!(extract(&raw, "BBB").unwrap(), other);
    }

    /// Extraction is a pure function of payload and ticker.
    #[test]
    fn prop_extract_is_idempotent(ticker in arb_ticker(), fields in arb_fields()) {
        let raw = batch(vec![record(&ticker, &fields)]);
        prop_assert_eq!(extract(&raw, &ticker), extract(&raw, &ticker));
    }

    /// Arbitrary bytes never panic the extractor.
    #[test]
    fn prop_garbage_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = extract(&raw, "AAA");
    }
}
