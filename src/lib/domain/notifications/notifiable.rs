//! Notifiable entities and notifications

use std::fmt;

use crate::domain::messaging::{MailTarget, MessageError, TemplatedMessage};

/// A notification that can be delivered as a Mailgun templated message
pub trait MailgunNotification: Send + Sync {
    /// Builds the message for `notifiable`.
    ///
    /// The recipient may be left unset, in which case the channel routes the
    /// notification to an address of the notifiable.
    fn to_mailgun(&self, notifiable: &NotifiableTarget<'_>)
        -> Result<TemplatedMessage, MessageError>;
}

/// An entity that can receive notifications.
///
/// Both capabilities are optional; entities implement whichever applies.
pub trait Notifiable: Send + Sync {
    /// Returns the route for the given notification channel, if any
    fn route_notification_for(
        &self,
        _channel: &str,
        _notification: &dyn MailgunNotification,
    ) -> Option<MailTarget> {
        None
    }

    /// Returns the entity's plain email address, if any
    fn email(&self) -> Option<String> {
        None
    }
}

/// Who to notify
pub enum NotifiableTarget<'a> {
    /// A bare address
    Address(String),

    /// An entity exposing routing hooks or an email address
    Entity(&'a dyn Notifiable),
}

impl<'a> NotifiableTarget<'a> {
    /// Creates a target for a notifiable entity
    pub fn entity(entity: &'a dyn Notifiable) -> Self {
        Self::Entity(entity)
    }
}

impl fmt::Debug for NotifiableTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => f.debug_tuple("Address").field(address).finish(),
            Self::Entity(_) => f.write_str("Entity(..)"),
        }
    }
}

impl From<&str> for NotifiableTarget<'_> {
    fn from(address: &str) -> Self {
        Self::Address(address.to_string())
    }
}

impl From<String> for NotifiableTarget<'_> {
    fn from(address: String) -> Self {
        Self::Address(address)
    }
}

impl<'a, T> From<&'a T> for NotifiableTarget<'a>
where
    T: Notifiable,
{
    fn from(entity: &'a T) -> Self {
        Self::Entity(entity)
    }
}
