//! Mailgun notification channel

use tracing::debug;

use crate::domain::{
    delivery::{EventDispatcher, SendError, SendResponse, TemplatesClient, Transport},
    messaging::TemplatedMessage,
    notifications::{
        notifiable::{MailgunNotification, NotifiableTarget},
        router::resolve_address,
    },
};

/// Envelope values applied to messages that do not set their own
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelDefaults {
    /// The default sender
    pub sender: Option<String>,

    /// The default `Reply-To` address
    pub reply_to: Option<String>,

    /// The default `Return-Path` address
    pub return_path: Option<String>,
}

impl ChannelDefaults {
    /// Fills unset envelope fields of `message`
    pub fn apply(&self, message: &mut TemplatedMessage) {
        if let (false, Some(sender)) = (message.has_sender(), &self.sender) {
            message.set_sender(sender);
        }

        if let (false, Some(reply_to)) = (message.has_reply_to(), &self.reply_to) {
            message.set_reply_to(reply_to);
        }

        if let (false, Some(return_path)) = (message.has_return_path(), &self.return_path) {
            message.set_return_path(return_path);
        }
    }
}

/// Delivers notifications as Mailgun templated messages
#[derive(Debug, Clone)]
pub struct MailgunChannel<T, E>
where
    T: Transport,
    E: EventDispatcher,
{
    client: TemplatesClient<T, E>,
    defaults: ChannelDefaults,
}

impl<T, E> MailgunChannel<T, E>
where
    T: Transport,
    E: EventDispatcher,
{
    /// Creates a new channel
    pub fn new(client: TemplatesClient<T, E>, defaults: ChannelDefaults) -> Self {
        Self { client, defaults }
    }

    /// The underlying client
    pub fn client(&self) -> &TemplatesClient<T, E> {
        &self.client
    }

    /// Sends a notification.
    ///
    /// # Arguments
    /// * `notifiable` - Who to notify.
    /// * `notification` - The notification to deliver.
    ///
    /// # Returns
    /// - [`Ok`] with the provider's [`SendResponse`] if the message was sent.
    /// - [`Ok`] with [`None`] if no recipient could be resolved; nothing is sent.
    /// - [`Err`] containing a [`SendError`] if building or sending the message failed.
    pub async fn send<N>(
        &self,
        notifiable: &NotifiableTarget<'_>,
        notification: &N,
    ) -> Result<Option<SendResponse>, SendError>
    where
        N: MailgunNotification,
    {
        let mut message = notification.to_mailgun(notifiable)?;

        if !message.has_recipient() {
            let Some(recipient) = resolve_address(notifiable, notification) else {
                debug!(
                    template = message.template_name(),
                    "no recipient for notification, skipping"
                );

                return Ok(None);
            };

            message.set_recipient(recipient);
        }

        self.defaults.apply(&mut message);

        self.client.send(&message).await.map(Some)
    }
}
