//! Templated email message

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    address::MailTarget,
    delivery_time::{self, DeliveryTime},
    errors::MessageError,
    headers::{normalize_header_name, HeaderValues},
    paths,
    wire::WireFormat,
};

const OPTION_PREFIX: &str = "o:";
const PARAM_PREFIX: &str = "v:";

/// A message rendered from a template stored at Mailgun.
///
/// Messages are built with raw `set_*` / `add_*` setters or their fluent
/// counterparts, and encoded with [`TemplatedMessage::to_wire_format`].
/// Recipient, sender and copy fields are resolved from a [`MailTarget`] when
/// they are written.
///
/// ```
/// use mailgun_templates::domain::messaging::TemplatedMessage;
///
/// let message = TemplatedMessage::new("welcome")?
///     .to("jo@example.com")
///     .param("name", "Jo");
///
/// assert_eq!(message.recipient(), Some("jo@example.com"));
/// # Ok::<(), mailgun_templates::domain::messaging::MessageError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TemplatedMessage {
    template_name: String,
    template_version: Option<String>,
    recipient: Option<String>,
    sender: Option<String>,
    carbon_copy: Option<String>,
    blind_carbon_copy: Option<String>,
    subject: Option<String>,
    domain: Option<String>,
    headers: BTreeMap<String, Vec<String>>,
    options: Map<String, Value>,
    parameters: Map<String, Value>,
}

impl TemplatedMessage {
    /// Creates a message for the given template.
    ///
    /// # Errors
    /// [`MessageError::EmptyTemplateName`] if `template_name` is empty.
    pub fn new(template_name: impl Into<String>) -> Result<Self, MessageError> {
        let template_name = template_name.into();

        if template_name.is_empty() {
            return Err(MessageError::EmptyTemplateName);
        }

        Ok(Self {
            template_name,
            template_version: None,
            recipient: None,
            sender: None,
            carbon_copy: None,
            blind_carbon_copy: None,
            subject: None,
            domain: None,
            headers: BTreeMap::new(),
            options: Map::new(),
            parameters: Map::new(),
        })
    }

    /// Creates a message for the given template with initial parameters.
    pub fn with_initial_params<I, K, V>(
        template_name: impl Into<String>,
        params: I,
    ) -> Result<Self, MessageError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut message = Self::new(template_name)?;
        message.set_params(params);

        Ok(message)
    }

    // Template

    /// The name of the template
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// The template version, if pinned
    pub fn template_version(&self) -> Option<&str> {
        self.template_version.as_deref()
    }

    /// Pins the template version
    pub fn set_template_version(&mut self, version: impl Into<String>) {
        self.template_version = Some(version.into());
    }

    /// Pins the template version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.set_template_version(version);
        self
    }

    // Envelope

    /// The resolved recipient
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    /// Checks whether a recipient is set
    pub fn has_recipient(&self) -> bool {
        self.recipient.is_some()
    }

    /// Sets the recipient
    pub fn set_recipient(&mut self, target: impl Into<MailTarget>) {
        self.recipient = target.into().resolve();
    }

    /// Sets the recipient
    pub fn to(mut self, target: impl Into<MailTarget>) -> Self {
        self.set_recipient(target);
        self
    }

    /// The resolved sender
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Checks whether a sender is set
    pub fn has_sender(&self) -> bool {
        self.sender.is_some()
    }

    /// Sets the sender
    pub fn set_sender(&mut self, target: impl Into<MailTarget>) {
        self.sender = target.into().resolve();
    }

    /// Sets the sender
    pub fn from(mut self, target: impl Into<MailTarget>) -> Self {
        self.set_sender(target);
        self
    }

    /// The resolved carbon copy recipient
    pub fn carbon_copy(&self) -> Option<&str> {
        self.carbon_copy.as_deref()
    }

    /// Sets the carbon copy recipient
    pub fn set_carbon_copy(&mut self, target: impl Into<MailTarget>) {
        self.carbon_copy = target.into().resolve();
    }

    /// Sets the carbon copy recipient
    pub fn cc(mut self, target: impl Into<MailTarget>) -> Self {
        self.set_carbon_copy(target);
        self
    }

    /// The resolved blind carbon copy recipient
    pub fn blind_carbon_copy(&self) -> Option<&str> {
        self.blind_carbon_copy.as_deref()
    }

    /// Sets the blind carbon copy recipient
    pub fn set_blind_carbon_copy(&mut self, target: impl Into<MailTarget>) {
        self.blind_carbon_copy = target.into().resolve();
    }

    /// Sets the blind carbon copy recipient
    pub fn bcc(mut self, target: impl Into<MailTarget>) -> Self {
        self.set_blind_carbon_copy(target);
        self
    }

    /// The subject line
    pub fn subject_line(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Sets the subject line
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
    }

    /// Sets the subject line
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.set_subject(subject);
        self
    }

    /// The sending domain override
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Checks whether the sending domain is overridden
    pub fn has_domain(&self) -> bool {
        self.domain.is_some()
    }

    /// Overrides the sending domain
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = Some(domain.into());
    }

    /// Sends the message via the given domain
    pub fn via(mut self, domain: impl Into<String>) -> Self {
        self.set_domain(domain);
        self
    }

    // Headers

    /// All headers, keyed by normalized name
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// Checks whether a header is set
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&normalize_header_name(name))
    }

    /// Adds one or more values to a header.
    ///
    /// Values are appended to any existing ones unless `replace` is set.
    pub fn add_header(&mut self, name: &str, values: impl Into<HeaderValues>, replace: bool) {
        let entry = self.headers.entry(normalize_header_name(name)).or_default();

        if replace {
            entry.clear();
        }

        entry.extend(values.into().0);
    }

    /// Adds several headers, appending to existing values
    pub fn set_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<HeaderValues>,
    {
        for (name, values) in headers {
            self.add_header(name.as_ref(), values, false);
        }
    }

    /// Removes a header
    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(&normalize_header_name(name));
    }

    /// Adds one or more values to a header
    pub fn header(mut self, name: &str, values: impl Into<HeaderValues>, replace: bool) -> Self {
        self.add_header(name, values, replace);
        self
    }

    /// Adds several headers
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<HeaderValues>,
    {
        self.set_headers(headers);
        self
    }

    /// Removes a header
    pub fn without_header(mut self, name: &str) -> Self {
        self.remove_header(name);
        self
    }

    /// Sets the `Reply-To` header, unless the target resolves to nothing
    pub fn set_reply_to(&mut self, target: impl Into<MailTarget>) {
        if let Some(address) = target.into().resolve() {
            self.add_header("reply-to", address, true);
        }
    }

    /// Checks whether a `Reply-To` header is set
    pub fn has_reply_to(&self) -> bool {
        self.has_header("reply-to")
    }

    /// Sets the `Reply-To` header
    pub fn reply_to(mut self, target: impl Into<MailTarget>) -> Self {
        self.set_reply_to(target);
        self
    }

    /// Sets the `Return-Path` header, unless the target resolves to nothing
    pub fn set_return_path(&mut self, target: impl Into<MailTarget>) {
        if let Some(address) = target.into().resolve() {
            self.add_header("return-path", address, true);
        }
    }

    /// Checks whether a `Return-Path` header is set
    pub fn has_return_path(&self) -> bool {
        self.has_header("return-path")
    }

    /// Sets the `Return-Path` header
    pub fn return_path(mut self, target: impl Into<MailTarget>) -> Self {
        self.set_return_path(target);
        self
    }

    // Options

    /// All provider options
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Checks whether an option is set. Dotted names address nested values.
    pub fn has_option(&self, name: &str) -> bool {
        paths::has(&self.options, strip_prefix(name, OPTION_PREFIX))
    }

    /// Sets a provider option. Dotted names address nested values.
    pub fn add_option(&mut self, name: &str, value: impl Into<Value>) {
        paths::set(
            &mut self.options,
            strip_prefix(name, OPTION_PREFIX),
            value.into(),
        );
    }

    /// Sets several provider options
    pub fn set_options<I, K, V>(&mut self, options: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in options {
            self.add_option(name.as_ref(), value);
        }
    }

    /// Removes a provider option
    pub fn remove_option(&mut self, name: &str) {
        paths::forget(&mut self.options, strip_prefix(name, OPTION_PREFIX));
    }

    /// Sets a provider option
    pub fn option(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.add_option(name, value);
        self
    }

    /// Sets several provider options
    pub fn with_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.set_options(options);
        self
    }

    /// Removes a provider option
    pub fn without_option(mut self, name: &str) -> Self {
        self.remove_option(name);
        self
    }

    /// Schedules delivery, storing the RFC 2822 time as the `deliverytime` option.
    ///
    /// `timezone` is an IANA name and defaults to UTC.
    ///
    /// # Errors
    /// [`MessageError::DateConstruction`] if the date or timezone cannot be parsed.
    pub fn deliver_at(
        self,
        time: impl Into<DeliveryTime>,
        timezone: Option<&str>,
    ) -> Result<Self, MessageError> {
        let formatted = delivery_time::format_rfc2822(&time.into(), timezone)?;

        Ok(self.option("deliverytime", formatted))
    }

    /// Toggles DKIM signatures
    pub fn dkim(self, enabled: bool) -> Self {
        self.option("dkim", yes_no(enabled))
    }

    /// Toggles Mailgun's test mode
    pub fn test_mode(self, enabled: bool) -> Self {
        self.option("testmode", yes_no(enabled))
    }

    /// Requires a TLS connection to the receiving server
    pub fn require_tls(self, enabled: bool) -> Self {
        self.option("require-tls", enabled)
    }

    /// Skips certificate verification of the receiving server
    pub fn skip_verification(self, enabled: bool) -> Self {
        self.option("skip-verification", enabled)
    }

    /// Attaches one or more tags
    pub fn tag(self, tag: impl Into<Value>) -> Self {
        self.option("tag", tag)
    }

    /// Toggles tracking
    pub fn tracking(self, enabled: bool) -> Self {
        self.option("tracking", enabled)
    }

    /// Toggles click tracking
    pub fn tracking_clicks(self, enabled: bool) -> Self {
        self.option("tracking-clicks", enabled)
    }

    /// Toggles open tracking
    pub fn tracking_opens(self, enabled: bool) -> Self {
        self.option("tracking-opens", enabled)
    }

    // Parameters

    /// All template parameters
    pub fn params(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Checks whether a parameter is set. Dotted names address nested values.
    pub fn has_param(&self, name: &str) -> bool {
        paths::has(&self.parameters, strip_prefix(name, PARAM_PREFIX))
    }

    /// Sets a template parameter. Dotted names address nested values.
    pub fn add_param(&mut self, name: &str, value: impl Into<Value>) {
        paths::set(
            &mut self.parameters,
            strip_prefix(name, PARAM_PREFIX),
            value.into(),
        );
    }

    /// Sets several template parameters
    pub fn set_params<I, K, V>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in params {
            self.add_param(name.as_ref(), value);
        }
    }

    /// Removes a template parameter
    pub fn remove_param(&mut self, name: &str) {
        paths::forget(&mut self.parameters, strip_prefix(name, PARAM_PREFIX));
    }

    /// Sets a template parameter
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.add_param(name, value);
        self
    }

    /// Sets a template parameter from any serializable value.
    ///
    /// # Errors
    /// [`MessageError::Serialization`] if `value` cannot be represented as JSON.
    pub fn try_param<T>(mut self, name: &str, value: &T) -> Result<Self, MessageError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.add_param(name, value);

        Ok(self)
    }

    /// Sets several template parameters
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.set_params(params);
        self
    }

    /// Removes a template parameter
    pub fn without_param(mut self, name: &str) -> Self {
        self.remove_param(name);
        self
    }

    // Encoding

    /// Encodes the message into the Mailgun messages API fields.
    ///
    /// Empty headers, blank options and unset envelope fields are left out.
    /// Parameters are always included, each encoded as JSON text.
    ///
    /// # Errors
    /// [`MessageError::Serialization`] if a parameter cannot be encoded.
    pub fn to_wire_format(&self) -> Result<WireFormat, MessageError> {
        let mut wire = WireFormat::default();

        for (name, values) in &self.options {
            if !is_blank(values) {
                wire.insert(format!("o:{name}"), values.clone());
            }
        }

        for (name, values) in &self.headers {
            let values: Vec<Value> = values
                .iter()
                .filter(|value| !value.is_empty())
                .map(|value| Value::String(value.clone()))
                .collect();

            if !values.is_empty() {
                wire.insert(format!("h:{name}"), Value::Array(values));
            }
        }

        for (name, value) in &self.parameters {
            wire.insert(format!("v:{name}"), Value::String(serde_json::to_string(value)?));
        }

        let fields = [
            ("bcc", self.blind_carbon_copy.as_deref()),
            ("cc", self.carbon_copy.as_deref()),
            ("from", self.sender.as_deref()),
            ("subject", self.subject.as_deref()),
            ("t:version", self.template_version.as_deref()),
            ("template", Some(self.template_name.as_str())),
            ("to", self.recipient.as_deref()),
        ];

        for (key, value) in fields {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                wire.insert(key, Value::String(value.to_string()));
            }
        }

        Ok(wire)
    }
}

fn yes_no(enabled: bool) -> &'static str {
    if enabled {
        "yes"
    } else {
        "no"
    }
}

fn strip_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// Blank option values are omitted from the wire format
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        // the string "0" is not blank
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
