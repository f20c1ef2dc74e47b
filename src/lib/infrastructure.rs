//! Infrastructure module

pub mod config;
pub mod events;
pub mod transports;
