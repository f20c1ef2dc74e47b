//! Delivery of encoded messages to the provider.

mod client;
mod errors;
mod events;
mod transport;

pub use client::TemplatesClient;
pub use errors::{SendError, TransportError};
pub use events::{EventDispatcher, MessageSent};
pub use transport::{SendResponse, Transport};
