//! Shared HTTP response helpers.
//!
//! Both endpoints degrade non-JSON bodies to `{"raw": <text>}` so callers
//! always receive a mapping, and both treat any status of 300 or above as a
//! failure.

use serde_json::{Map, Value};

/// Read a response into its status code and a mapping body.
pub async fn read_response(resp: reqwest::Response) -> Result<(u16, Value), reqwest::Error> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    Ok((status, parse_body(&text)))
}

/// Whether `status` is a failure for this service contract.
pub const fn is_failure(status: u16) -> bool {
    status >= 300
}

/// Parse `text` as a JSON object, wrapping anything else as `{"raw": text}`.
pub fn parse_body(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => value,
        _ => {
            let mut raw = Map::new();
            raw.insert("raw".to_string(), Value::String(text.to_string()));
            Value::Object(raw)
        }
    }
}
