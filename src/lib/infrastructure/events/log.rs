//! Logging event dispatcher

use tracing::info;

use crate::domain::delivery::{EventDispatcher, MessageSent};

/// Logs delivery events
#[derive(Debug, Default, Clone)]
pub struct TracingEventDispatcher;

impl EventDispatcher for TracingEventDispatcher {
    fn dispatch(&self, event: MessageSent) {
        info!(
            message_id = %event.message_id,
            status = %event.message,
            "templated message accepted"
        );
    }
}
