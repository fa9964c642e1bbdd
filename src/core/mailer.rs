// src/core/mailer.rs
//! Optional SMTP delivery of generated ideas

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{error, info};

use super::config_manager::SmtpConfig;

pub const EMAIL_SUBJECT: &str = "Your Business Ideas";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("E-mail delivery is not configured on this server")]
    NotConfigured,

    #[error("Invalid e-mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build e-mail: {0}")]
    Build(String),

    #[error("Failed to send e-mail: {0}")]
    Transport(String),
}

struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Sends the ideas text to a recipient. Built disabled when no SMTP
/// section or credentials are configured.
pub struct Mailer {
    sender: Option<SmtpSender>,
}

impl Mailer {
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn from_config(config: Option<&SmtpConfig>) -> Result<Self, MailError> {
        let Some(config) = config else {
            return Ok(Self::disabled());
        };

        let from_address = config.from.as_deref().unwrap_or(&config.username);
        let from = parse_mailbox(from_address)?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        let mut builder = builder.credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ));
        if let Some(port) = config.port {
            builder = builder.port(port);
        }

        info!("SMTP relay configured: {}", config.host);
        Ok(Self {
            sender: Some(SmtpSender {
                transport: builder.build(),
                from,
            }),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    pub async fn send_ideas(&self, recipient: &str, content: &str) -> Result<(), MailError> {
        let sender = self.sender.as_ref().ok_or(MailError::NotConfigured)?;
        let message = build_message(&sender.from, recipient, content)?;

        sender.transport.send(message).await.map_err(|e| {
            error!("SMTP delivery failed: {}", e);
            MailError::Transport(e.to_string())
        })?;

        info!("Ideas e-mailed successfully");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Plain-text part carries the ideas verbatim, the HTML part uses `html_body`.
pub fn build_message(from: &Mailbox, recipient: &str, content: &str) -> Result<Message, MailError> {
    let to = parse_mailbox(recipient)?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(EMAIL_SUBJECT)
        .multipart(MultiPart::alternative_plain_html(
            content.to_string(),
            html_body(content),
        ))
        .map_err(|e| MailError::Build(e.to_string()))
}

pub fn html_body(content: &str) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; white-space: pre-wrap;\">{}</div>",
        escape_html(content)
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
