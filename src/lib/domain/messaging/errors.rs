//! Message errors

use thiserror::Error;

/// Errors that can occur while building or encoding a templated message
#[derive(Debug, Error)]
pub enum MessageError {
    /// The template name is empty
    #[error("template name must not be empty")]
    EmptyTemplateName,

    /// A delivery time or timezone could not be constructed
    #[error("could not construct delivery time: {0}")]
    DateConstruction(String),

    /// A parameter value could not be encoded as JSON
    #[error("could not encode message parameter: {0}")]
    Serialization(#[from] serde_json::Error),
}
