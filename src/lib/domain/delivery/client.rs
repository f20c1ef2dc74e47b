//! Templates client

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    delivery::{
        errors::SendError,
        events::{EventDispatcher, MessageSent},
        transport::{SendResponse, Transport},
    },
    messaging::TemplatedMessage,
};

/// Sends templated messages through a [`Transport`] and announces them to an
/// [`EventDispatcher`]
#[derive(Debug, Clone)]
pub struct TemplatesClient<T, E>
where
    T: Transport,
    E: EventDispatcher,
{
    transport: Arc<T>,
    events: Arc<E>,
    domain: String,
}

impl<T, E> TemplatesClient<T, E>
where
    T: Transport,
    E: EventDispatcher,
{
    /// Creates a new client sending via `domain` unless a message overrides it
    pub fn new(transport: Arc<T>, events: Arc<E>, domain: impl Into<String>) -> Self {
        Self {
            transport,
            events,
            domain: domain.into(),
        }
    }

    /// The default sending domain
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Sends a message.
    ///
    /// # Arguments
    /// * `message` - The [`TemplatedMessage`] to send.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the provider's [`SendResponse`]
    /// if the message was accepted, or an [`Err`] containing a [`SendError`] if
    /// it could not be encoded or the transport failed.
    pub async fn send(&self, message: &TemplatedMessage) -> Result<SendResponse, SendError> {
        let fields = message.to_wire_format()?;
        let domain = message.domain().unwrap_or(&self.domain);

        let response = self.transport.send_message(domain, &fields).await?;

        info!(
            message_id = %response.id,
            template = message.template_name(),
            domain,
            "templated message sent"
        );

        self.events.dispatch(MessageSent {
            message_id: response.id.clone(),
            message: response.message.clone(),
        });

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::delivery::{
        errors::TransportError, events::MockEventDispatcher, transport::MockTransport,
    };

    use super::*;

    fn accepted() -> SendResponse {
        SendResponse {
            id: "<1@mg.example.com>".to_string(),
            message: "Queued. Thank you.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_uses_configured_domain() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send_message()
            .times(1)
            .withf(|domain, fields| {
                domain == "mg.example.com"
                    && fields.get("template") == Some(&json!("welcome"))
                    && fields.get("to") == Some(&json!("a@b.com"))
            })
            .returning(|_, _| Ok(accepted()));

        let mut events = MockEventDispatcher::new();
        events.expect_dispatch().times(1).return_const(());

        let client = TemplatesClient::new(Arc::new(transport), Arc::new(events), "mg.example.com");
        let message = TemplatedMessage::new("welcome")?.to("a@b.com");

        let response = client.send(&message).await?;

        assert_eq!(response, accepted());

        Ok(())
    }

    #[tokio::test]
    async fn test_send_prefers_message_domain() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send_message()
            .times(1)
            .withf(|domain, _| domain == "override.example.com")
            .returning(|_, _| Ok(accepted()));

        let mut events = MockEventDispatcher::new();
        events.expect_dispatch().times(1).return_const(());

        let client = TemplatesClient::new(Arc::new(transport), Arc::new(events), "mg.example.com");
        let message = TemplatedMessage::new("welcome")?.via("override.example.com");

        client.send(&message).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_emits_event_after_sending() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send_message()
            .times(1)
            .returning(|_, _| Ok(accepted()));

        let mut events = MockEventDispatcher::new();

        events
            .expect_dispatch()
            .times(1)
            .withf(|event| {
                event.message_id == "<1@mg.example.com>" && event.message == "Queued. Thank you."
            })
            .return_const(());

        let client = TemplatesClient::new(Arc::new(transport), Arc::new(events), "mg.example.com");

        client.send(&TemplatedMessage::new("welcome")?).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_without_event() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send_message()
            .times(1)
            .returning(|_, _| Err(TransportError::Unauthorized));

        let mut events = MockEventDispatcher::new();
        events.expect_dispatch().times(0);

        let client = TemplatesClient::new(Arc::new(transport), Arc::new(events), "mg.example.com");

        let result = client.send(&TemplatedMessage::new("welcome")?).await;

        assert!(matches!(
            result,
            Err(SendError::Transport(TransportError::Unauthorized))
        ));

        Ok(())
    }
}
