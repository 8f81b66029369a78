//! # restwire - REST-style dispatch over arbitrary duplex transports
//!
//! `restwire` lets any duplex messaging channel (raw sockets, persistent
//! connections, message queues) carry REST-style semantics without an HTTP
//! stack: the transport hands the [`Dispatcher`] a parsed [`Message`] with
//! a method and a path plus a delivery callback, and gets back exactly one
//! JSON-API-shaped [`Payload`] per message - from the matched handler, or
//! from the dispatcher's own 400/404/500 error path.
//!
//! The transport layer (accepting connections, framing, serializing) stays
//! entirely outside this crate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restwire::{BoxError, Dispatcher, Message, Request, Response};
//! use serde_json::json;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.get("/apple/:id", |req: Request, res: Response| async move {
//!     res.status(200)
//!         .data("Apple", req.param("id").unwrap_or_default(), json!({"flavor": "sweet"}))
//!         .send()?;
//!     Ok(())
//! });
//!
//! // Per inbound message, from your socket/queue loop:
//! dispatcher
//!     .receive(Message::new("GET", "/apple/3444"), move |payload| {
//!         // serialize `payload` back onto your wire
//!     })
//!     .await;
//! ```
//!
//! ## Delivery discipline
//!
//! Each dispatch cycle ends in exactly one delivery. Handlers own the
//! decision of *when*: they may call [`Response::send`] inline or move a
//! clone of the response into a spawned task and send later. A second
//! `send()` on the same response fails with [`SendError::AlreadySent`]
//! rather than corrupting the already-delivered snapshot.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;
mod handler;
mod pattern;
mod response;
mod route;

pub use dispatcher::Dispatcher;
pub use handler::{ErasedHandler, Handler};
pub use pattern::PathPattern;
pub use response::Response;
pub use route::RouteTable;

pub use restwire_core::{
    BoxError, ErrorObject, ErrorOptions, Message, Params, Payload, Request, Resource, SendError,
};
