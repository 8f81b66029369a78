//! The dispatch core.
//!
//! One [`Dispatcher`] owns the route table. Transport collaborators feed it
//! parsed messages via [`receive`](Dispatcher::receive) together with a
//! delivery callback, and every dispatch cycle ends with exactly one
//! delivery: either the handler sends, or the dispatcher sends the 400/404/
//! 500 error envelope itself.

use crate::handler::Handler;
use crate::response::Response;
use crate::route::RouteTable;
use futures::FutureExt;
use restwire_core::{ErrorOptions, Message, Payload, Request};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

const NOT_FOUND_DETAIL: &str = "The page or resource you are looking for does not exist";

/// The transport-agnostic request dispatcher.
///
/// Registration is a setup-time operation (`&mut self`); dispatch is
/// `&self` and safe to run concurrently from many connections, since each
/// cycle owns its own [`Request`] and [`Response`] and the table itself is
/// read-only by then.
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.get("/dogs/:id", |req: Request, res: Response| async move {
///     res.data("Dog", req.param("id").unwrap_or_default(), json!({"name": "Rex"}))
///         .send()?;
///     Ok(())
/// });
///
/// // Per inbound message, from the transport layer:
/// dispatcher.receive(message, |payload| socket.deliver(payload)).await;
/// ```
#[derive(Default)]
pub struct Dispatcher {
    routes: RouteTable,
}

impl Dispatcher {
    /// Create a dispatcher with an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an arbitrary method and path template.
    pub fn route(&mut self, method: &str, template: &str, handler: impl Handler) -> &mut Self {
        self.routes.register(method, template, Arc::new(handler));
        self
    }

    /// Register a handler for `GET` on the given path template.
    pub fn get(&mut self, template: &str, handler: impl Handler) -> &mut Self {
        self.route("get", template, handler)
    }

    /// Register a handler for `POST` on the given path template.
    pub fn post(&mut self, template: &str, handler: impl Handler) -> &mut Self {
        self.route("post", template, handler)
    }

    /// Register a handler for `PUT` on the given path template.
    pub fn put(&mut self, template: &str, handler: impl Handler) -> &mut Self {
        self.route("put", template, handler)
    }

    /// Register a handler for `PATCH` on the given path template.
    pub fn patch(&mut self, template: &str, handler: impl Handler) -> &mut Self {
        self.route("patch", template, handler)
    }

    /// Register a handler for `DELETE` on the given path template.
    pub fn delete(&mut self, template: &str, handler: impl Handler) -> &mut Self {
        self.route("delete", template, handler)
    }

    /// The registered routes, for inspection.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Process one inbound message.
    ///
    /// `callback` is invoked exactly once per cycle with the final
    /// [`Payload`] - by the handler's `send()`, by the dispatcher's own
    /// error path, or later if the handler deferred delivery to a task it
    /// spawned. The returned [`Response`] handle may therefore still be
    /// unsent when this call returns.
    ///
    /// Handler failures (`Err` returns and panics) are converted into a
    /// 500 envelope at this boundary and never propagate to the caller;
    /// the triggering error is not logged by the core.
    pub async fn receive(
        &self,
        message: Message,
        callback: impl FnOnce(Payload) + Send + 'static,
    ) -> Response {
        let response = Response::new();
        response.wire(Box::new(callback));

        let Some(method) = message.method().map(str::to_owned) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejecting message without a string 'method' field");
            let _ = response
                .error(
                    "Bad Request",
                    ErrorOptions::new(
                        400,
                        "receive() requires the inbound message to contain a string value called 'method'",
                    ),
                )
                .send();
            return response;
        };

        let Some(path) = message.path().map(str::to_owned) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejecting message without a string 'path' field");
            let _ = response
                .error(
                    "Bad Request",
                    ErrorOptions::new(
                        400,
                        "receive() requires the inbound message to contain a string value called 'path'",
                    ),
                )
                .send();
            return response;
        };

        let Some((handler, params)) = self.routes.find(&method, &path) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(%method, %path, "no route matched");
            let _ = response
                .error("Not Found", ErrorOptions::new(404, NOT_FOUND_DETAIL))
                .send();
            return response;
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(%method, %path, "dispatching to matched route");

        let request = Request::new(method, path, params, message);

        // The one protected boundary around user code: an Err return or a
        // panic becomes the 500 envelope, and the cycle still ends in a
        // send. If the handler already delivered before failing, the first
        // delivery stands and this send is the AlreadySent no-op.
        let outcome = AssertUnwindSafe(handler.call_erased(request, response.clone()))
            .catch_unwind()
            .await;
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%error, "handler failed");
                let _ = response
                    .error("Internal Error", ErrorOptions::new(500, error.to_string()))
                    .send();
            }
            Err(panic) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("handler panicked");
                let _ = response
                    .error(
                        "Internal Error",
                        ErrorOptions::new(500, panic_message(panic.as_ref())),
                    )
                    .send();
            }
        }

        response
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "handler panicked".to_string()
    }
}
