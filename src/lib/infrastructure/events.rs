//! Event dispatcher implementations

mod broadcast;
mod log;

pub use broadcast::BroadcastEventDispatcher;
pub use log::TracingEventDispatcher;
