//! Outgoing email.
//!
//! Services send mail through the [`Mailer`] trait. Production uses [`SmtpMailer`];
//! tests substitute a recording implementation.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::server::{
    config::EmailConfig,
    error::{config::ConfigError, internal::InternalError, AppError},
    model::user::User,
};

/// A plain-text message to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl Email {
    pub fn welcome(user: &User, url: &str) -> Self {
        Self {
            to: user.email.clone(),
            subject: "Welcome to the Tourboard family!".to_string(),
            text: format!(
                "Hi {},\n\nWelcome to Tourboard, we're glad to have you.\n\
                 Upload a photo and complete your profile at {}\n",
                first_name(&user.name),
                url
            ),
        }
    }

    pub fn password_reset(user: &User, reset_url: &str) -> Self {
        Self {
            to: user.email.clone(),
            subject: "Your password reset token (valid for only 10 minutes)".to_string(),
            text: format!(
                "Hi {},\n\nForgot your password? Submit a PATCH request with your new password \
                 and passwordConfirm to: {}\n\nIf you didn't forget your password, please ignore \
                 this email.\n",
                first_name(&user.name),
                reset_url
            ),
        }
    }
}

fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), AppError>;
}

/// SMTP mail transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport from configuration. No connection is made until the first send.
    ///
    /// # Returns
    /// - `Ok(SmtpMailer)` - Configured transport
    /// - `Err(AppError::ConfigErr)` - `EMAIL_FROM` is not a valid mailbox
    pub fn new(config: &EmailConfig) -> Result<Self, AppError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: "EMAIL_FROM".to_string(),
                value: config.from.clone(),
            })?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<(), AppError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| InternalError::Email(e.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text)
            .map_err(|e| InternalError::Email(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| InternalError::Email(e.to_string()))?;

        Ok(())
    }
}

/// Mailer that keeps every message in memory, optionally failing every send.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    sent: std::sync::Mutex<Vec<Email>>,
    fail: bool,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails.
    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), AppError> {
        if self.fail {
            return Err(InternalError::Email("mail server unavailable".to_string()).into());
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email);
        }

        Ok(())
    }
}
