//! Log-only transport
//!
//! Accepts every message without contacting Mailgun and logs the encoded
//! fields instead. Useful in development and when previewing messages.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    delivery::{SendResponse, Transport, TransportError},
    messaging::WireFormat,
};

/// The status message Mailgun returns for queued messages
pub const QUEUED_MESSAGE: &str = "Queued. Thank you.";

/// Transport that logs messages instead of sending them
#[derive(Debug, Default, Clone)]
pub struct LogTransport;

impl LogTransport {
    /// Create a new log transport
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for LogTransport {
    async fn send_message(
        &self,
        domain: &str,
        fields: &WireFormat,
    ) -> Result<SendResponse, TransportError> {
        let id = format!("<{}@{}>", Uuid::now_v7(), domain);

        for (key, value) in fields.form_fields() {
            info!(%id, %key, %value, "message field");
        }

        info!(%id, domain, fields = fields.len(), "Log: skipped sending message");

        Ok(SendResponse {
            id,
            message: QUEUED_MESSAGE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::messaging::TemplatedMessage;

    use super::*;

    #[tokio::test]
    async fn test_send_message_returns_queued_response() -> TestResult {
        let fields = TemplatedMessage::new("welcome")?
            .to("a@b.com")
            .to_wire_format()?;

        let response = LogTransport::new()
            .send_message("mg.example.com", &fields)
            .await?;

        assert!(response.id.starts_with('<'));
        assert!(response.id.ends_with("@mg.example.com>"));
        assert_eq!(response.message, QUEUED_MESSAGE);

        Ok(())
    }
}
