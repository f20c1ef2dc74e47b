//! Broadcast event dispatcher

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::delivery::{EventDispatcher, MessageSent};

/// Fans delivery events out to any number of subscribers
#[derive(Debug, Clone)]
pub struct BroadcastEventDispatcher {
    sender: broadcast::Sender<MessageSent>,
}

impl BroadcastEventDispatcher {
    /// Creates a dispatcher buffering up to `capacity` events per subscriber.
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));

        Self { sender }
    }

    /// Subscribes to events dispatched from now on
    pub fn subscribe(&self) -> broadcast::Receiver<MessageSent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventDispatcher {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventDispatcher for BroadcastEventDispatcher {
    fn dispatch(&self, event: MessageSent) {
        if let Err(err) = self.sender.send(event) {
            debug!(message_id = %err.0.message_id, "no subscribers for MessageSent");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{
            delivery::TemplatesClient,
            messaging::{MessageError, TemplatedMessage},
            notifications::{
                ChannelDefaults, MailgunChannel, MailgunNotification, NotifiableTarget,
            },
        },
        infrastructure::transports::LogTransport,
    };

    use super::*;

    struct Welcome;

    impl MailgunNotification for Welcome {
        fn to_mailgun(
            &self,
            _notifiable: &NotifiableTarget<'_>,
        ) -> Result<TemplatedMessage, MessageError> {
            TemplatedMessage::new("welcome")
        }
    }

    fn event() -> MessageSent {
        MessageSent {
            message_id: "<1@mg.example.com>".to_string(),
            message: "Queued. Thank you.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() -> TestResult {
        let dispatcher = BroadcastEventDispatcher::default();
        let mut first = dispatcher.subscribe();
        let mut second = dispatcher.subscribe();

        dispatcher.dispatch(event());

        assert_eq!(first.recv().await?, event());
        assert_eq!(second.recv().await?, event());

        Ok(())
    }

    #[test]
    fn test_dispatch_without_subscribers_is_silent() {
        BroadcastEventDispatcher::new(1).dispatch(event());
    }

    #[tokio::test]
    async fn test_zero_capacity_still_delivers() -> TestResult {
        let dispatcher = BroadcastEventDispatcher::new(0);
        let mut subscriber = dispatcher.subscribe();

        dispatcher.dispatch(event());

        assert_eq!(subscriber.recv().await?, event());

        Ok(())
    }

    #[tokio::test]
    async fn test_channel_send_reaches_subscribers() -> TestResult {
        let dispatcher = Arc::new(BroadcastEventDispatcher::default());
        let mut audit = dispatcher.subscribe();

        let channel = MailgunChannel::new(
            TemplatesClient::new(Arc::new(LogTransport::new()), dispatcher, "mg.example.com"),
            ChannelDefaults::default(),
        );

        let response = channel
            .send(&NotifiableTarget::from("foo@bar.com"), &Welcome)
            .await?
            .expect("message should be sent");

        let sent = audit.recv().await?;

        assert_eq!(sent.message_id, response.id);
        assert_eq!(sent.message, response.message);

        Ok(())
    }
}
