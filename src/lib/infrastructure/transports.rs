//! Transport implementations

mod log;

pub use log::{LogTransport, QUEUED_MESSAGE};
