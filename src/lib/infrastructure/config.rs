//! Mailgun configuration

use clap::Parser;

use crate::domain::notifications::ChannelDefaults;

/// Mailgun configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Parser)]
pub struct MailgunConfig {
    /// The default sending domain
    #[arg(long = "mailgun-domain", env = "MAILGUN_DOMAIN")]
    pub domain: String,

    /// The default sender, e.g. `App <noreply@example.com>`
    #[arg(long = "mailgun-from", env = "MAILGUN_FROM")]
    pub sender: Option<String>,

    /// The default `Reply-To` address
    #[arg(long = "mailgun-reply-to", env = "MAILGUN_REPLY_TO")]
    pub reply_to: Option<String>,

    /// The default `Return-Path` address
    #[arg(long = "mailgun-return-path", env = "MAILGUN_RETURN_PATH")]
    pub return_path: Option<String>,
}

impl MailgunConfig {
    /// The envelope defaults for the notification channel
    pub fn defaults(&self) -> ChannelDefaults {
        ChannelDefaults {
            sender: self.sender.clone(),
            reply_to: self.reply_to.clone(),
            return_path: self.return_path.clone(),
        }
    }
}
