//! Notification routing

use tracing::debug;

use crate::domain::{
    messaging::MailTarget,
    notifications::notifiable::{MailgunNotification, NotifiableTarget},
};

/// The notification channel name routing hooks are queried with first
pub const NOTIFICATION_DRIVER: &str = "mailgun";

/// The channel name queried when the entity has no Mailgun-specific route
pub const FALLBACK_DRIVER: &str = "mail";

/// Resolves the address a notification should be delivered to.
///
/// Bare addresses are used as-is. Entities are asked for their `mailgun`
/// route, then their `mail` route, then their plain email address; the first
/// non-empty answer wins. Routed targets are reduced to a bare address.
///
/// Returns [`None`] if no address could be found.
pub fn resolve_address(
    notifiable: &NotifiableTarget<'_>,
    notification: &dyn MailgunNotification,
) -> Option<String> {
    let entity = match notifiable {
        NotifiableTarget::Address(address) => return non_empty(address.clone()),
        NotifiableTarget::Entity(entity) => *entity,
    };

    let routed = [NOTIFICATION_DRIVER, FALLBACK_DRIVER]
        .into_iter()
        .find_map(|channel| {
            let address = entity
                .route_notification_for(channel, notification)
                .and_then(reduce)?;

            debug!(channel, "routed notification");

            Some(address)
        });

    routed.or_else(|| entity.email().and_then(non_empty))
}

/// Reduces a routed target to its address, dropping any display name
fn reduce(target: MailTarget) -> Option<String> {
    let address = match target {
        MailTarget::Empty => None,
        MailTarget::Plain(address) => Some(address),
        MailTarget::Structured { address, .. } => Some(address),
        MailTarget::List(items) => items.into_iter().next(),
        MailTarget::Mapping { key, .. } => Some(key),
    };

    address.and_then(non_empty)
}

fn non_empty(address: String) -> Option<String> {
    if address.is_empty() {
        None
    } else {
        Some(address)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        messaging::{MessageError, TemplatedMessage},
        notifications::notifiable::Notifiable,
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

    #[derive(Default)]
    struct User {
        email: Option<String>,
        mailgun_route: Option<MailTarget>,
        mail_route: Option<MailTarget>,
    }

    impl Notifiable for User {
        fn route_notification_for(
            &self,
            channel: &str,
            _notification: &dyn MailgunNotification,
        ) -> Option<MailTarget> {
            match channel {
                NOTIFICATION_DRIVER => self.mailgun_route.clone(),
                FALLBACK_DRIVER => self.mail_route.clone(),
                _ => None,
            }
        }

        fn email(&self) -> Option<String> {
            self.email.clone()
        }
    }

    struct Anonymous;

    impl Notifiable for Anonymous {}

    fn resolve(notifiable: impl Into<NotifiableTarget<'static>>) -> Option<String> {
        resolve_address(&notifiable.into(), &Welcome)
    }

    #[test]
    fn test_bare_address_is_used_directly() {
        assert_eq!(resolve("foo@bar.com"), Some("foo@bar.com".to_string()));
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_entity_with_email() {
        let user = User {
            email: Some("foo@bar.com".to_string()),
            ..Default::default()
        };

        assert_eq!(
            resolve_address(&NotifiableTarget::from(&user), &Welcome),
            Some("foo@bar.com".to_string())
        );
    }

    #[test]
    fn test_entity_with_mailgun_route() {
        let user = User {
            mailgun_route: Some("foo@bar.com".into()),
            mail_route: Some("other@bar.com".into()),
            ..Default::default()
        };

        assert_eq!(
            resolve_address(&NotifiableTarget::from(&user), &Welcome),
            Some("foo@bar.com".to_string())
        );
    }

    #[test]
    fn test_entity_falls_back_to_mail_route() {
        let user = User {
            mailgun_route: Some(MailTarget::Empty),
            mail_route: Some("foo@bar.com".into()),
            ..Default::default()
        };

        assert_eq!(
            resolve_address(&NotifiableTarget::from(&user), &Welcome),
            Some("foo@bar.com".to_string())
        );
    }

    #[test]
    fn test_mapping_route_is_reduced_to_address() {
        let user = User {
            mail_route: Some(MailTarget::mapping("foo@bar.com", "Foo Bar")),
            ..Default::default()
        };

        assert_eq!(
            resolve_address(&NotifiableTarget::from(&user), &Welcome),
            Some("foo@bar.com".to_string())
        );
    }

    #[test]
    fn test_list_route_is_reduced_to_first_element() {
        let user = User {
            mail_route: Some(vec!["foo@bar.com", "bar@bar.com"].into()),
            ..Default::default()
        };

        assert_eq!(
            resolve_address(&NotifiableTarget::from(&user), &Welcome),
            Some("foo@bar.com".to_string())
        );
    }

    #[test]
    fn test_route_wins_over_email() {
        let user = User {
            email: Some("email@bar.com".to_string()),
            mail_route: Some("route@bar.com".into()),
            ..Default::default()
        };

        assert_eq!(
            resolve_address(&NotifiableTarget::from(&user), &Welcome),
            Some("route@bar.com".to_string())
        );
    }

    #[test]
    fn test_entity_without_address() {
        let user = User {
            email: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(resolve_address(&NotifiableTarget::from(&user), &Welcome), None);
        assert_eq!(
            resolve_address(&NotifiableTarget::from(&Anonymous), &Welcome),
            None
        );
    }
}
