//! Delivery events

use serde::Serialize;

#[cfg(test)]
use mockall::mock;

/// Raised after the provider accepted a templated message
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageSent {
    /// The provider-assigned message ID
    pub message_id: String,

    /// The provider's status message
    pub message: String,
}

/// Receives delivery events. Dispatching is fire-and-forget.
pub trait EventDispatcher: Send + Sync + 'static {
    /// Dispatches a [`MessageSent`] event
    fn dispatch(&self, event: MessageSent);
}

#[cfg(test)]
mock! {
    pub EventDispatcher {}

    impl EventDispatcher for EventDispatcher {
        fn dispatch(&self, event: MessageSent);
    }
}
