#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Builds a templated message from the command line and prints its wire
//! format, or pushes it through the notification channel with `--send`.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use mailgun_templates::{
    domain::{
        delivery::TemplatesClient,
        messaging::{MessageError, TemplatedMessage},
        notifications::{MailgunChannel, MailgunNotification, NotifiableTarget},
    },
    infrastructure::{
        config::MailgunConfig, events::TracingEventDispatcher, transports::LogTransport,
    },
};
use serde_json::Value;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The Mailgun configuration
    #[clap(flatten)]
    pub mailgun: MailgunConfig,

    /// The name of the template stored at Mailgun
    pub template: String,

    /// The template version
    #[arg(long = "template-version")]
    pub template_version: Option<String>,

    /// The recipient
    #[arg(long)]
    pub to: Option<String>,

    /// The sender, overriding the configured default
    #[arg(long = "from")]
    pub sender: Option<String>,

    /// The carbon copy recipient
    #[arg(long)]
    pub cc: Option<String>,

    /// The blind carbon copy recipient
    #[arg(long)]
    pub bcc: Option<String>,

    /// The subject line
    #[arg(long)]
    pub subject: Option<String>,

    /// A template parameter as `name=value`; values are read as JSON when possible
    #[arg(long = "param", value_parser = parse_json_pair)]
    pub params: Vec<(String, Value)>,

    /// A provider option as `name=value`; values are read as JSON when possible
    #[arg(long = "option", value_parser = parse_json_pair)]
    pub options: Vec<(String, Value)>,

    /// A custom header as `name=value`
    #[arg(long = "header", value_parser = parse_pair)]
    pub headers: Vec<(String, String)>,

    /// Schedules delivery at the given date
    #[arg(long = "deliver-at")]
    pub deliver_at: Option<String>,

    /// The timezone of the delivery date
    #[arg(long, requires = "deliver_at")]
    pub timezone: Option<String>,

    /// Send the message through the log transport instead of printing it
    #[arg(long)]
    pub send: bool,
}

/// A notification carrying a prebuilt message
#[derive(Debug)]
struct PreparedNotification {
    message: TemplatedMessage,
}

impl MailgunNotification for PreparedNotification {
    fn to_mailgun(
        &self,
        _notifiable: &NotifiableTarget<'_>,
    ) -> Result<TemplatedMessage, MessageError> {
        Ok(self.message.clone())
    }
}

fn parse_pair(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected `name=value`, got {raw:?}"))?;

    Ok((name.to_string(), value.to_string()))
}

fn parse_json_pair(raw: &str) -> Result<(String, Value)> {
    let (name, value) = parse_pair(raw)?;
    let value = serde_json::from_str(&value).unwrap_or(Value::String(value));

    Ok((name, value))
}

fn build_message(args: &Args) -> Result<TemplatedMessage> {
    let mut message = TemplatedMessage::new(&args.template)?
        .with_params(args.params.iter().cloned())
        .with_options(args.options.iter().cloned())
        .with_headers(args.headers.iter().cloned());

    if let Some(version) = &args.template_version {
        message.set_template_version(version);
    }

    message.set_recipient(args.to.as_ref());
    message.set_sender(args.sender.as_ref());
    message.set_carbon_copy(args.cc.as_ref());
    message.set_blind_carbon_copy(args.bcc.as_ref());

    if let Some(subject) = &args.subject {
        message.set_subject(subject);
    }

    if let Some(deliver_at) = &args.deliver_at {
        message = message.deliver_at(deliver_at.as_str(), args.timezone.as_deref())?;
    }

    Ok(message)
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let message = build_message(&args)?;

    if !args.send {
        let mut message = message;
        args.mailgun.defaults().apply(&mut message);

        println!("{}", serde_json::to_string_pretty(&message.to_wire_format()?)?);

        return Ok(());
    }

    let client = TemplatesClient::new(
        Arc::new(LogTransport::new()),
        Arc::new(TracingEventDispatcher),
        &args.mailgun.domain,
    );
    let channel = MailgunChannel::new(client, args.mailgun.defaults());

    let notifiable = NotifiableTarget::from(args.to.clone().unwrap_or_default());
    let notification = PreparedNotification { message };

    match channel.send(&notifiable, &notification).await? {
        Some(response) => println!("{} {}", response.id, response.message),
        None => warn!("no recipient given, nothing was sent"),
    }

    Ok(())
}
