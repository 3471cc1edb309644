//! # Notifier
//!
//! Mails a generated purchase request to supplier addresses.
//!
//! Delivery problems are returned as a typed `NotifyError` and never abort the
//! request. The text shown to the user is derived from the result with
//! `describe`.

use crate::config::SmtpConfig;
use crate::purchase::document::GeneratedDocument;
use lettre::address::AddressError;
use lettre::message::header::{ContentType, ContentTypeErr};
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{info, warn};
use std::fs;
use std::io;
use thiserror::Error;

pub const EMAIL_BODY: &str = "Dear Supplier,\n\n\
Please find attached the Purchase Request for low-stock items.\n\n\
Regards,\nFactory MMS";

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// The mail server accepted the message for these addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipients: Vec<String>,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no recipients")]
    NoRecipients,
    #[error("invalid address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        source: AddressError,
    },
    #[error("could not read attachment {path}: {source}")]
    Attachment { path: String, source: io::Error },
    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] ContentTypeErr),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("{0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

pub trait Notifier: Send + Sync {
    /// Sends `document` as an attachment to every address in `recipients`.
    fn send(
        &self,
        document: &GeneratedDocument,
        recipients: &[String],
    ) -> Result<Delivery, NotifyError>;
}

/// User-facing summary of a delivery attempt.
pub fn describe(result: &Result<Delivery, NotifyError>) -> String {
    match result {
        Ok(delivery) => format!("✅ Email sent to {}", delivery.recipients.join(", ")),
        Err(e) => format!("❌ Failed to send email: {}", e),
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .trim()
        .parse()
        .map_err(|source| NotifyError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

/// Authenticated SMTP submission with a STARTTLS upgrade.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub(crate) fn build_message(
        &self,
        document: &GeneratedDocument,
        recipients: &[String],
    ) -> Result<Message, NotifyError> {
        if recipients.is_empty() {
            return Err(NotifyError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(mailbox(&self.config.sender)?)
            .subject(format!("Purchase Request ({})", document.encoding.label()));
        for recipient in recipients {
            builder = builder.to(mailbox(recipient)?);
        }

        let bytes = fs::read(&document.path).map_err(|source| NotifyError::Attachment {
            path: document.path.display().to_string(),
            source,
        })?;
        let attachment = Attachment::new(document.file_name())
            .body(bytes, ContentType::parse(ATTACHMENT_CONTENT_TYPE)?);

        let message = builder.multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(EMAIL_BODY.to_string()))
                .singlepart(attachment),
        )?;
        Ok(message)
    }

    fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let transport = SmtpTransport::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .timeout(self.config.timeout)
            .build();
        Ok(transport)
    }
}

impl Notifier for SmtpNotifier {
    fn send(
        &self,
        document: &GeneratedDocument,
        recipients: &[String],
    ) -> Result<Delivery, NotifyError> {
        let result = self
            .build_message(document, recipients)
            .and_then(|message| Ok(self.transport()?.send(&message)?));

        match result {
            Ok(_) => {
                info!(
                    "Purchase request mailed to {} recipient(s) via {}:{}",
                    recipients.len(),
                    self.config.host,
                    self.config.port
                );
                Ok(Delivery {
                    recipients: recipients.to_vec(),
                })
            }
            Err(e) => {
                warn!("Purchase request mail failed: {}", e);
                Err(e)
            }
        }
    }
}
