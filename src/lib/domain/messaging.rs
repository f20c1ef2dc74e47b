//! Templated messages and their encoding into the Mailgun wire format.

mod address;
mod delivery_time;
mod errors;
mod headers;
mod message;
mod paths;
mod wire;

pub use address::{resolve, MailTarget};
pub use delivery_time::{DeliveryTime, DEFAULT_DELIVERY_TIMEZONE};
pub use errors::MessageError;
pub use headers::{normalize_header_name, HeaderValues};
pub use message::TemplatedMessage;
pub use wire::WireFormat;
