//! Domain module

pub mod delivery;
pub mod messaging;
pub mod notifications;
