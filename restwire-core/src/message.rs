//! Inbound messages and per-dispatch requests.
//!
//! A [`Message`] is whatever the transport collaborator parsed off the wire:
//! a JSON object expected to carry string `method` and `path` fields plus
//! arbitrary extra fields (body, auth token, correlation id...). The
//! dispatcher validates the two required fields and merges captured route
//! parameters over a copy of the rest to form the [`Request`] a handler
//! receives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A parsed inbound message, as delivered by a transport collaborator.
///
/// Field access is deliberately loose: [`method`](Self::method) and
/// [`path`](Self::path) return `None` both when the field is absent and
/// when it holds a non-string value, so the dispatcher treats either case
/// as the same 400 condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    /// Create a message with the given method and path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("method".to_string(), Value::String(method.into()));
        fields.insert("path".to_string(), Value::String(path.into()));
        Self(fields)
    }

    /// Create an empty message, useful for exercising validation paths.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an arbitrary field, replacing any previous value under `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The `method` field, if present and a string.
    pub fn method(&self) -> Option<&str> {
        self.0.get("method").and_then(Value::as_str)
    }

    /// The `path` field, if present and a string.
    pub fn path(&self) -> Option<&str> {
        self.0.get("path").and_then(Value::as_str)
    }

    /// Look up an arbitrary field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Consume the message, yielding its underlying field map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Value> for Message {
    /// Wrap a parsed JSON value. Non-object values become an empty message,
    /// which the dispatcher then rejects as missing `method`.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }
}

/// Named parameters captured from a path pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one capture, replacing any previous value under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a capture by parameter name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The request seen by a route handler.
///
/// Built once per dispatch cycle from the validated message and the route's
/// captures; immutable thereafter and owned by the handler invocation.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    params: Params,
    fields: Map<String, Value>,
}

impl Request {
    /// Assemble a request from its validated parts. The message's remaining
    /// fields stay reachable through [`get`](Self::get).
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        params: Params,
        message: Message,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            params,
            fields: message.into_fields(),
        }
    }

    /// The request method, exactly as it arrived.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The requested path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All captured path parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Look up a single captured parameter, e.g. `req.param("id")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Look up any other field from the original message.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_non_string_fields_read_as_missing() {
        let message = Message::empty();
        assert_eq!(message.method(), None);
        assert_eq!(message.path(), None);

        let message = Message::from(json!({"method": 42, "path": ["/a"]}));
        assert_eq!(message.method(), None);
        assert_eq!(message.path(), None);
    }

    #[test]
    fn extra_fields_survive_into_the_request() {
        let message = Message::new("POST", "/dogs").with("body", json!({"name": "Rex"}));
        let request = Request::new("POST", "/dogs", Params::new(), message);

        assert_eq!(request.method(), "POST");
        assert_eq!(request.path(), "/dogs");
        assert_eq!(request.get("body"), Some(&json!({"name": "Rex"})));
    }

    #[test]
    fn non_object_json_becomes_an_empty_message() {
        let message = Message::from(json!("just a string"));
        assert_eq!(message.method(), None);
        assert_eq!(message, Message::empty());
    }

    #[test]
    fn params_lookup() {
        let mut params = Params::new();
        params.insert("id", "3444");

        assert_eq!(params.get("id"), Some("3444"));
        assert_eq!(params.get("name"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn message_deserializes_transparently() {
        let message: Message =
            serde_json::from_str(r#"{"method": "GET", "path": "/x", "token": "abc"}"#).unwrap();
        assert_eq!(message.method(), Some("GET"));
        assert_eq!(message.path(), Some("/x"));
        assert_eq!(message.get("token"), Some(&json!("abc")));
    }
}
