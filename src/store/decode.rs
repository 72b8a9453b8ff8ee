//! Load-response decoding.
//!
//! Two explicit steps instead of inline content-type branching: `classify`
//! tags the body by how the server declared it, `normalize` turns the
//! tagged body into a document or the empty marker.

use serde_json::{Map, Value};

/// A load-response body, tagged by the declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// The server declared `application/json`.
    Structured(String),
    /// Anything else; parsed as JSON only if non-empty.
    Text(String),
}

/// Tag a response body from its `Content-Type` header.
pub fn classify(content_type: Option<&str>, body: String) -> ResponseBody {
    match content_type {
        Some(ct) if ct.contains("application/json") => ResponseBody::Structured(body),
        _ => ResponseBody::Text(body),
    }
}

/// A normalized load result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// A usable document.
    Document(Value),
    /// No content: an empty text body, or a decoded JSON `null`.
    Empty,
}

/// Normalize a tagged body into a document.
///
/// An empty text body is not an error; a structured body that fails to
/// parse is (the server lied about the content type).
pub fn normalize(body: ResponseBody) -> Result<Normalized, serde_json::Error> {
    match body {
        ResponseBody::Structured(text) => serde_json::from_str(&text).map(non_null),
        ResponseBody::Text(text) if text.trim().is_empty() => Ok(Normalized::Empty),
        ResponseBody::Text(text) => serde_json::from_str(&text).map(non_null),
    }
}

fn non_null(value: Value) -> Normalized {
    if value.is_null() {
        Normalized::Empty
    } else {
        Normalized::Document(value)
    }
}

/// The fallback document installed when the remote has nothing usable.
pub fn empty_document() -> Value {
    Value::Object(Map::new())
}
