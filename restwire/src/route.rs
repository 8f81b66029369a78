//! The ordered route table.
//!
//! Registration order is the only matching policy: `find` scans entries in
//! the order they were registered and returns the first whose method and
//! pattern both match. Duplicate or ambiguous patterns are allowed; the
//! earlier registration simply shadows the later one.

use crate::handler::ErasedHandler;
use crate::pattern::PathPattern;
use restwire_core::Params;
use std::sync::Arc;

struct Route {
    method: String,
    pattern: PathPattern,
    handler: Arc<dyn ErasedHandler>,
}

/// An ordered set of `(method, pattern, handler)` entries.
///
/// Built during setup and read-only during dispatch; the dispatcher's API
/// enforces that split by taking `&mut self` for registration and `&self`
/// for matching.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one route. Methods are stored lowercased so matching is
    /// case-insensitive; the template compiles once here.
    pub fn register(&mut self, method: &str, template: &str, handler: Arc<dyn ErasedHandler>) {
        self.entries.push(Route {
            method: method.to_ascii_lowercase(),
            pattern: PathPattern::parse(template),
            handler,
        });
    }

    /// Find the first entry matching `method` and `path`, in registration
    /// order, together with its captured parameters.
    pub fn find(&self, method: &str, path: &str) -> Option<(Arc<dyn ErasedHandler>, Params)> {
        let method = method.to_ascii_lowercase();
        for route in &self.entries {
            if route.method != method {
                continue;
            }
            if let Some(params) = route.pattern.matches(path) {
                return Some((Arc::clone(&route.handler), params));
            }
        }
        None
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
