//! JSON extraction from free-text model replies.
//!
//! Models are told to answer with JSON only, but replies routinely arrive
//! wrapped in prose or markdown fences. The scan below walks candidate `{`
//! positions, finds the balanced span for each (string- and escape-aware so
//! braces inside string literals do not count), and returns the first span
//! that parses as a JSON object. Anything unparseable falls back to
//! `{"raw_response": <full reply>}`.

use serde_json::{Map, Value};

/// Parse a model reply into a JSON object map, falling back to the
/// raw-response shape when no object can be extracted.
pub fn parse_reply(text: &str) -> Map<String, Value> {
    match extract_object(text) {
        Some(Value::Object(map)) => map,
        _ => {
            let mut map = Map::new();
            map.insert("raw_response".into(), Value::String(text.to_string()));
            map
        }
    }
}

/// Find the first balanced `{...}` span that parses as JSON.
pub fn extract_object(text: &str) -> Option<Value> {
    let starts: Vec<usize> = text
        .char_indices()
        .filter(|&(_, c)| c == '{')
        .map(|(i, _)| i)
        .collect();

    for &start in &starts {
        if let Some(end) = balanced_end(text, start) {
            if let Ok(value @ Value::Object(_)) = serde_json::from_str(&text[start..=end]) {
                return Some(value);
            }
        }
    }
    None
}

/// Byte index of the `}` closing the object opened at `start`, or `None`
/// when the braces never balance.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i);
                }
            }
            _ => {}
        }
    }
    None
}
