//! Request bodies, response envelopes and shared response types

use crate::error::{RestError, RestResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

// ============================================================================
// Response Envelope
// ============================================================================

/// Parsed response envelope
pub type Envelope = Map<String, Value>;

const STATUS_FIELD: &str = "status";
const MESSAGE_FIELD: &str = "message";
const OK: &str = "ok";

/// Parse a response and check its status contract
///
/// A response is successful only when both `status` and `message` are
/// `"ok"`. A missing field counts as a failure.
pub fn validate(raw: &str) -> RestResult<Envelope> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RestError::MalformedResponse(format!("response is not valid JSON: {}", e)))?;

    let Value::Object(envelope) = value else {
        return Err(RestError::MalformedResponse(
            "response is not a JSON object".to_string(),
        ));
    };

    let status = envelope.get(STATUS_FIELD).and_then(Value::as_str);
    let message = envelope.get(MESSAGE_FIELD).and_then(Value::as_str);

    if status != Some(OK) || message != Some(OK) {
        return Err(RestError::ApiStatus {
            status: describe(envelope.get(STATUS_FIELD)),
            message: describe(envelope.get(MESSAGE_FIELD)),
        });
    }

    Ok(envelope)
}

fn describe(field: Option<&Value>) -> String {
    match field {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "<missing>".to_string(),
    }
}

/// Produce the output text for a validated response
///
/// Raw output is the original response text. Otherwise the bookkeeping
/// `status` and `message` fields are dropped and the rest re-serialized.
pub fn shape(raw: &str, mut envelope: Envelope, raw_output: bool) -> String {
    if raw_output {
        return raw.to_string();
    }

    envelope.remove(STATUS_FIELD);
    envelope.remove(MESSAGE_FIELD);
    Value::Object(envelope).to_string()
}

// ============================================================================
// Request Body
// ============================================================================

/// Body of a POST request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured JSON
    Json(Value),
    /// JSON text, parsed before the nonce is added
    Text(String),
}

impl RequestBody {
    /// An empty JSON object
    pub fn empty() -> Self {
        Self::Json(Value::Object(Map::new()))
    }

    /// Normalize into a JSON object
    pub fn into_object(self) -> RestResult<Map<String, Value>> {
        let value = match self {
            Self::Json(value) => value,
            Self::Text(text) => serde_json::from_str(&text).map_err(|e| {
                RestError::invalid("body", format!("payload is not valid JSON: {}", e))
            })?,
        };

        match value {
            Value::Object(map) => Ok(map),
            other => Err(RestError::invalid(
                "body",
                format!("payload must be a JSON object, got {}", json_type(&other)),
            )),
        }
    }

    /// Text to transmit as-is
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Map<String, Value>> for RequestBody {
    fn from(map: Map<String, Value>) -> Self {
        Self::Json(Value::Object(map))
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Options for a POST request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostOptions {
    /// Send the body exactly as supplied, without adding a nonce
    pub raw_payload: bool,
    /// Return the response text unmodified
    pub raw_output: bool,
}

impl PostOptions {
    /// Default options with the given output mode
    pub fn with_output(raw_output: bool) -> Self {
        Self {
            raw_payload: false,
            raw_output,
        }
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Current prices for a single coin
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quote {
    /// Highest buy order
    pub bid: Decimal,
    /// Lowest sell order
    pub ask: Decimal,
    /// Last traded price
    #[serde(default)]
    pub last: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_validate_ok_envelope() {
        let envelope = validate(r#"{"status":"ok","message":"ok","prices":{}}"#).unwrap();
        assert!(envelope.contains_key("prices"));
    }

    #[test]
    fn test_validate_rejects_bad_status_or_message() {
        for raw in [
            r#"{"status":"bad","message":"ok"}"#,
            r#"{"status":"ok","message":"bad"}"#,
            r#"{"status":"bad","message":"bad"}"#,
        ] {
            assert!(
                matches!(validate(raw), Err(RestError::ApiStatus { .. })),
                "{raw} should fail"
            );
        }
    }

    #[test]
    fn test_validate_reports_offending_fields() {
        match validate(r#"{"status":"error","message":"Invalid coin type"}"#) {
            Err(RestError::ApiStatus { status, message }) => {
                assert_eq!(status, "error");
                assert_eq!(message, "Invalid coin type");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_missing_fields() {
        match validate("{}") {
            Err(RestError::ApiStatus { status, message }) => {
                assert_eq!(status, "<missing>");
                assert_eq!(message, "<missing>");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_malformed() {
        assert!(matches!(validate("<html>"), Err(RestError::MalformedResponse(_))));
        assert!(matches!(validate("[1,2]"), Err(RestError::MalformedResponse(_))));
    }

    #[test]
    fn test_shape_prunes_bookkeeping() {
        let raw = r#"{"status":"ok","message":"ok","test":"response"}"#;
        let shaped = shape(raw, validate(raw).unwrap(), false);
        assert_eq!(shaped, r#"{"test":"response"}"#);
    }

    #[test]
    fn test_shape_raw_output_is_untouched() {
        let raw = "{\"status\": \"ok\",\n \"message\": \"ok\", \"test\": \"response\"}";
        assert_eq!(shape(raw, validate(raw).unwrap(), true), raw);
    }

    #[test]
    fn test_body_from_text() {
        let map = RequestBody::from(r#"{"test":"other"}"#).into_object().unwrap();
        assert_eq!(map["test"], "other");
    }

    #[test]
    fn test_body_must_be_object() {
        let err = RequestBody::from("[1]").into_object().unwrap_err();
        assert!(matches!(err, RestError::InvalidArgument { field: "body", .. }));

        let err = RequestBody::from("not json").into_object().unwrap_err();
        assert!(matches!(err, RestError::InvalidArgument { field: "body", .. }));

        let err = RequestBody::from(json!("text")).into_object().unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_body_into_text() {
        assert_eq!(RequestBody::empty().into_text(), "{}");
        assert_eq!(RequestBody::from(" raw ").into_text(), " raw ");
    }

    #[test]
    fn test_quote_from_string_prices() {
        let quote: Quote =
            serde_json::from_value(json!({"bid": "100.5", "ask": "101.25", "last": "100.75"}))
                .unwrap();
        assert_eq!(quote.bid, dec!(100.5));
        assert_eq!(quote.ask, dec!(101.25));
        assert_eq!(quote.last, Some(dec!(100.75)));
    }
}
