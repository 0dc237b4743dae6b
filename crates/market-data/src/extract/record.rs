//! Record scoping for batch payloads.
//!
//! A batch response holds one JSON object per symbol. Before any field is
//! scraped, the search is narrowed to the object that carries the symbol's own
//! `"symbol":"<ticker>"` marker, so a field missing from one record can never
//! be satisfied by the next record in the buffer.

/// Returns the innermost JSON object enclosing the ticker's symbol marker.
///
/// The scan is string-aware (braces inside string values are ignored) but does
/// not otherwise validate the payload. Returns `None` when the marker is absent
/// or its enclosing object is never closed.
pub(crate) fn find_record<'a>(raw: &'a str, ticker: &str) -> Option<&'a str> {
    let marker = format!("\"symbol\":\"{}\"", ticker);
    let bytes = raw.as_bytes();

    let mut open: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    // (start offset, depth) of the object that holds the marker
    let mut found: Option<(usize, usize)> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => {
                if found.is_none() && raw[i..].starts_with(&marker) {
                    if let Some(&start) = open.last() {
                        found = Some((start, open.len()));
                    }
                }
                in_string = true;
            }
            b'{' => open.push(i),
            b'}' => {
                open.pop();
                if let Some((start, depth)) = found {
                    if open.len() < depth {
                        return Some(&raw[start..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    None
}
