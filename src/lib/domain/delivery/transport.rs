//! Provider transport

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::mock;

use crate::domain::{delivery::errors::TransportError, messaging::WireFormat};

/// The provider's answer to an accepted message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    /// The provider-assigned message ID
    pub id: String,

    /// The provider's status message
    pub message: String,
}

/// Transport to the provider's messages API
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Sends an encoded message
    ///
    /// # Arguments
    /// * `domain` - The sending domain.
    /// * `fields` - The encoded message.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the provider's [`SendResponse`],
    /// or an [`Err`] containing a [`TransportError`] if the message was not accepted.
    async fn send_message(
        &self,
        domain: &str,
        fields: &WireFormat,
    ) -> Result<SendResponse, TransportError>;
}

#[cfg(test)]
mock! {
    pub Transport {}

    impl Clone for Transport {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Transport for Transport {
        async fn send_message(&self, domain: &str, fields: &WireFormat) -> Result<SendResponse, TransportError>;
    }
}
