//! The response builder.
//!
//! One [`Response`] exists per dispatch cycle. It is a cheaply clonable
//! handle over shared state, so the dispatcher can hand one clone to the
//! handler and return another to its caller, and a handler may move a
//! clone into a spawned task to deliver later. All mutators chain:
//!
//! ```rust,ignore
//! res.status(200)
//!     .set("X-Request-Id", id)
//!     .data("Apple", "3444", json!({"flavor": "sweet"}))
//!     .send()?;
//! ```
//!
//! Delivery happens at most once: the first `send()` hands an owned
//! snapshot of the payload to the wired callback, and every later attempt
//! fails with [`SendError::AlreadySent`].

use restwire_core::{ErrorOptions, Payload, Resource, SendError};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type DeliveryFn = Box<dyn FnOnce(Payload) + Send + 'static>;

struct Inner {
    payload: Payload,
    delivery: Option<DeliveryFn>,
    sent: bool,
}

/// Mutable accumulator for one outgoing reply, enforcing single delivery.
#[derive(Clone)]
pub struct Response {
    inner: Arc<Mutex<Inner>>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create an unsent response with the default payload (status 200,
    /// `Content-Type: text/json`) and no delivery callback wired yet.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                payload: Payload::default(),
                delivery: None,
                sent: false,
            })),
        }
    }

    /// One-time wiring of the delivery callback, done by the dispatcher
    /// before the handler ever sees this handle. An unwired response still
    /// honors the single-send discipline; its delivery is just a no-op.
    pub(crate) fn wire(&self, delivery: DeliveryFn) {
        self.lock().delivery = Some(delivery);
    }

    /// Set the status code. No validation of legality.
    pub fn status(&self, status: u16) -> &Self {
        self.lock().payload.status = status;
        self
    }

    /// Set or overwrite one header.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) -> &Self {
        self.lock().payload.headers.insert(name.into(), value.into());
        self
    }

    /// Append one JSON-API resource object to the data sequence.
    pub fn data(&self, kind: impl Into<String>, id: impl Into<String>, attributes: Value) -> &Self {
        self.lock().payload.push_resource(Resource {
            kind: kind.into(),
            id: id.into(),
            attributes,
        });
        self
    }

    /// Append one error object, clearing any accumulated data and
    /// overwriting the status with `options.status`.
    pub fn error(&self, title: impl Into<String>, options: ErrorOptions) -> &Self {
        self.lock().payload.push_error(title, options);
        self
    }

    /// Deliver the response.
    ///
    /// Takes an owned snapshot of the payload, permanently marks this
    /// response as sent, then invokes the wired callback with the snapshot.
    /// Later mutation of the builder can never reach a delivered payload.
    ///
    /// # Errors
    ///
    /// [`SendError::AlreadySent`] if the response was already delivered.
    pub fn send(&self) -> Result<&Self, SendError> {
        // The callback runs outside the lock so it may freely touch the
        // response handle (or panic) without wedging it.
        let (delivery, snapshot) = {
            let mut inner = self.lock();
            if inner.sent {
                return Err(SendError::AlreadySent);
            }
            inner.sent = true;
            (inner.delivery.take(), inner.payload.clone())
        };

        if let Some(delivery) = delivery {
            delivery(snapshot);
        }
        Ok(self)
    }

    /// Whether `send()` has already fired.
    pub fn is_sent(&self) -> bool {
        self.lock().sent
    }

    /// A snapshot of the payload in its current state.
    pub fn payload(&self) -> Payload {
        self.lock().payload.clone()
    }

    // A handler that panicked between builder calls must not wedge the
    // dispatcher's own error-path send, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Handle identity, only so tests can `assert_eq!` on `Result<&Self, _>`.
#[cfg(test)]
impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Response")
            .field("payload", &inner.payload)
            .field("sent", &inner.sent)
            .finish_non_exhaustive()
    }
}
