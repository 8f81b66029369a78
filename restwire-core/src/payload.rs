//! The JSON-API-shaped response envelope.
//!
//! A [`Payload`] is what the delivery callback receives: a status code, a
//! header map, and exactly one of `data` (resource objects) or `errors`
//! (error objects) per <https://jsonapi.org/>. The transport collaborator
//! serializes it onto the wire however it likes; `serde` derives are
//! provided for the common JSON case.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single JSON-API resource object, e.g. `{"type": "Dog", "id": "23", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type, e.g. `"Dog"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The resource id. JSON-API ids are strings on the wire.
    pub id: String,
    /// The resource attributes, an arbitrary JSON object.
    pub attributes: Value,
}

/// A single JSON-API error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Short, human-readable summary, e.g. `"Not Found"`.
    pub title: String,
    /// Human-readable explanation specific to this occurrence.
    pub detail: String,
}

/// Options for [`Payload::push_error`] and `Response::error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOptions {
    /// The status code the error overwrites onto the payload.
    pub status: u16,
    /// Detail text for the error object.
    pub detail: String,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            status: 500,
            detail: String::new(),
        }
    }
}

impl ErrorOptions {
    /// Create options with the given status and detail.
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

/// The response envelope delivered to the transport collaborator.
///
/// Constructed with `status = 200` and a `Content-Type: text/json` header;
/// `data` and `errors` stay absent until first use and are mutually
/// exclusive in any terminal payload ([`push_error`](Self::push_error)
/// clears `data`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// HTTP-like status code. Not validated for legality.
    pub status: u16,
    /// Response headers. Always carries at least `Content-Type`.
    pub headers: BTreeMap<String, String>,
    /// JSON-API resource objects, in insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Resource>>,
    /// JSON-API error objects, in insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorObject>>,
}

impl Default for Payload {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "text/json".to_string());
        Self {
            status: 200,
            headers,
            data: None,
            errors: None,
        }
    }
}

impl Payload {
    /// Append a resource object, creating the `data` sequence on first use.
    pub fn push_resource(&mut self, resource: Resource) {
        self.data.get_or_insert_with(Vec::new).push(resource);
    }

    /// Append an error object, creating the `errors` sequence on first use.
    ///
    /// Also clears any accumulated `data` and overwrites `status` with
    /// `options.status`, keeping the data/errors exclusivity invariant.
    pub fn push_error(&mut self, title: impl Into<String>, options: ErrorOptions) {
        self.data = None;
        self.errors.get_or_insert_with(Vec::new).push(ErrorObject {
            title: title.into(),
            detail: options.detail,
        });
        self.status = options.status;
    }
}
