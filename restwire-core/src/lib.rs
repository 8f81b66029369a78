//! # restwire-core
//!
//! Core data model for the restwire dispatch framework.
//!
//! This crate has minimal dependencies and holds the value types shared by
//! the dispatch core and any transport collaborator:
//!
//! - [`Payload`] - the JSON-API-shaped response envelope
//! - [`Message`] - the parsed inbound message handed over by a transport
//! - [`Request`] - the per-dispatch request seen by route handlers
//! - [`Params`] - named path captures
//! - [`SendError`] - the single-delivery violation
//!
//! Transports depend on this crate alone when all they need is to build a
//! [`Message`] from inbound bytes and serialize the [`Payload`] they receive
//! through the delivery callback.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod message;
mod payload;

pub use error::{BoxError, SendError};
pub use message::{Message, Params, Request};
pub use payload::{ErrorObject, ErrorOptions, Payload, Resource};
