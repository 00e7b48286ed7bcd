pub mod payment;
pub mod process;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{Map, Value};

pub(crate) const UNSUPPORTED_TYPE: &str = "Unsupported type, only application/json applicable";

pub(crate) fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

pub(crate) fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Parse the body as a JSON object. Errors are ready-made 415/400 responses.
pub(crate) fn parse_object(headers: &HeaderMap, body: &[u8]) -> Result<Map<String, Value>, Response> {
    if !is_json(headers) {
        return Err(json_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, UNSUPPORTED_TYPE));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(json_error(StatusCode::BAD_REQUEST, "Request body must be a JSON object")),
        Err(e) => Err(json_error(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

/// A field's text, empty when absent or null. Numbers and booleans are
/// rendered as JSON text.
pub(crate) fn text_field(body: &Map<String, Value>, name: &str) -> String {
    match body.get(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Truthiness of a submitted value: absent, null, empty string, zero and
/// false all count as "not provided".
pub(crate) fn is_provided(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_type_with_charset_is_json() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));
    }

    #[test]
    fn missing_content_type_is_not_json() {
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn provided_follows_truthiness() {
        assert!(!is_provided(None));
        assert!(!is_provided(Some(&json!(""))));
        assert!(!is_provided(Some(&json!(0))));
        assert!(is_provided(Some(&json!(10.99))));
        assert!(is_provided(Some(&json!("James"))));
    }

    #[test]
    fn text_field_renders_numbers() {
        let body = json!({"a": "x", "b": 12, "c": null});
        let map = body.as_object().unwrap();
        assert_eq!(text_field(map, "a"), "x");
        assert_eq!(text_field(map, "b"), "12");
        assert_eq!(text_field(map, "c"), "");
        assert_eq!(text_field(map, "d"), "");
    }
}
