//! SMTP notification channel using Lettre.

use super::{Notification, Notifier};
use crate::config::SmtpConfig;
use crate::error::{Result, SwapError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP notification channel.
///
/// Sends plain-text mail through an authenticated STARTTLS relay on the
/// tokio runtime.
///
/// # Examples
///
/// ```ignore
/// use swapp_core::config::SmtpConfig;
/// use swapp_core::providers::SmtpNotifier;
///
/// let notifier = SmtpNotifier::new(&SmtpConfig::from_env()?)?;
/// ```
#[derive(Clone)]
pub struct SmtpNotifier {
    /// SMTP server address.
    host: String,

    /// SMTP server port.
    port: u16,

    /// SMTP credentials.
    credentials: Credentials,

    /// Parsed "From" mailbox.
    from: Mailbox,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Create a new SMTP channel.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Configuration`] if the sender address is invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| SwapError::Configuration(format!("Invalid from address: {e}")))?;

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            credentials: Credentials::new(config.username.clone(), config.password.clone()),
            from,
        })
    }

    /// Build SMTP transport for one message.
    ///
    /// # Errors
    ///
    /// Returns error if the relay cannot be configured.
    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| SwapError::NotificationFailed(format!("SMTP relay error: {e}")))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();
        Ok(transport)
    }

    fn build_message(&self, notification: &Notification) -> Result<Message> {
        let to = notification
            .recipient_email
            .parse::<Mailbox>()
            .map_err(|e| SwapError::NotificationFailed(format!("Invalid to address: {e}")))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| SwapError::NotificationFailed(format!("Failed to build email: {e}")))
    }
}

impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let email = self.build_message(notification)?;
        let mailer = self.build_transport()?;

        mailer
            .send(email)
            .await
            .map_err(|e| SwapError::NotificationFailed(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}
