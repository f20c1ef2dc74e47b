//! Delivery errors

use thiserror::Error;
use tracing::debug;

use crate::domain::messaging::MessageError;

/// Errors raised by a [`Transport`](super::Transport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// The provider could not be reached
    #[error("could not reach the provider: {0}")]
    Network(String),

    /// The provider rejected the credentials
    #[error("the provider rejected the credentials")]
    Unauthorized,

    /// The provider rejected the message
    #[error("the provider rejected the message: {0}")]
    Rejected(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when sending a message
#[derive(Debug, Error)]
pub enum SendError {
    /// The message could not be encoded
    #[error(transparent)]
    Message(MessageError),

    /// The transport failed
    #[error(transparent)]
    Transport(TransportError),
}

impl From<MessageError> for SendError {
    fn from(err: MessageError) -> Self {
        debug!("MessageError -> SendError");

        SendError::Message(err)
    }
}

impl From<TransportError> for SendError {
    fn from(err: TransportError) -> Self {
        debug!("TransportError -> SendError");

        SendError::Transport(err)
    }
}
