//! Route handlers.
//!
//! A handler is the terminal point of one dispatch cycle: it receives the
//! owned [`Request`] and a [`Response`] handle, and is responsible for
//! calling `send()` exactly once - immediately, or later from a task it
//! spawned. Returning `Err` is the handler's failure channel; the
//! dispatcher converts it into a 500 response.

use crate::response::Response;
use futures::future::BoxFuture;
use restwire_core::{BoxError, Request};
use std::future::Future;

/// The endpoint invoked for a matched route.
///
/// Implemented automatically for async closures and functions of the shape
/// `Fn(Request, Response) -> Future<Output = Result<(), BoxError>>`.
///
/// # Example
///
/// ```rust,ignore
/// async fn show_dog(req: Request, res: Response) -> Result<(), BoxError> {
///     res.status(200)
///         .data("Dog", req.param("id").unwrap_or_default(), json!({"name": "Rex"}))
///         .send()?;
///     Ok(())
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot serve as a route handler",
    label = "missing `Handler` implementation",
    note = "Handlers take a `Request` and a `Response` and return `Result<(), BoxError>`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Execute the handler. The handler (not the dispatcher) owns the
    /// decision of when to call [`Response::send`].
    fn call(
        &self,
        request: Request,
        response: Response,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

// Blanket impl for closures and async fns
impl<F, Fut> Handler for F
where
    F: Fn(Request, Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    fn call(
        &self,
        request: Request,
        response: Response,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        (self)(request, response)
    }
}

/// Object-safe twin of [`Handler`], boxing the returned future so handlers
/// of different concrete types can share a route table.
pub trait ErasedHandler: Send + Sync {
    /// Execute the handler with a boxed future.
    fn call_erased(
        &self,
        request: Request,
        response: Response,
    ) -> BoxFuture<'_, Result<(), BoxError>>;
}

impl<H: Handler> ErasedHandler for H {
    fn call_erased(
        &self,
        request: Request,
        response: Response,
    ) -> BoxFuture<'_, Result<(), BoxError>> {
        Box::pin(self.call(request, response))
    }
}
