//! Notification channel glue: routing notifiable entities to an address and
//! handing the resulting message to the client.

mod channel;
mod notifiable;
mod router;

pub use channel::{ChannelDefaults, MailgunChannel};
pub use notifiable::{MailgunNotification, Notifiable, NotifiableTarget};
pub use router::{resolve_address, FALLBACK_DRIVER, NOTIFICATION_DRIVER};
