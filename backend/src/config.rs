//! Process-wide configuration, read once at startup.
//!
//! Values come from the environment (optionally seeded from a `.env` file by
//! `main`). Everything downstream receives the resulting `AppConfig` instead of
//! reading globals.

use crate::purchase::document::DocumentOutput;
use crate::purchase::pipeline::PipelineSettings;
use log::warn;
use mms_common::purchase::{DocumentEncoding, DEFAULT_LOW_STOCK_THRESHOLD};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Single threshold used by the dashboard, the alert listing and the
    /// purchase-request pipeline.
    pub low_stock_threshold: i64,
    pub output_dir: PathBuf,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    /// Encoding of the document mailed by the pipeline.
    pub pipeline_encoding: DocumentEncoding,
    pub dedup_recipients: bool,
    pub open_browser: bool,
    pub smtp: SmtpConfig,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
    /// `None` keeps the transport's default socket timeout.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let username = lookup("SMTP_USERNAME").unwrap_or_default();
        let sender = lookup("SMTP_SENDER")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| username.clone());
        let timeout = parse_optional::<u64, _>(&lookup, "SMTP_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        Ok(Self {
            host: text("MMS_HOST", "127.0.0.1"),
            port: parse_or(&lookup, "MMS_PORT", 8080)?,
            database_path: PathBuf::from(text("DATABASE_PATH", "maintenance.db")),
            low_stock_threshold: threshold(&lookup),
            output_dir: PathBuf::from(text("MMS_OUTPUT_DIR", "generated")),
            fonts_dir: PathBuf::from(text("MMS_FONTS_DIR", "./fonts")),
            font_family: text("MMS_FONT_FAMILY", "LiberationSans"),
            pipeline_encoding: parse_or(&lookup, "MMS_PR_ENCODING", DocumentEncoding::Pdf)?,
            dedup_recipients: flag(&lookup, "MMS_DEDUP_RECIPIENTS", false)?,
            open_browser: flag(&lookup, "MMS_OPEN_BROWSER", false)?,
            smtp: SmtpConfig {
                host: text("SMTP_HOST", "smtp.gmail.com"),
                port: parse_or(&lookup, "SMTP_PORT", 587)?,
                username,
                password: lookup("SMTP_PASSWORD").unwrap_or_default(),
                sender,
                timeout,
            },
        })
    }

    pub fn document_output(&self) -> DocumentOutput {
        DocumentOutput {
            output_dir: self.output_dir.clone(),
            fonts_dir: self.fonts_dir.clone(),
            font_family: self.font_family.clone(),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            threshold: self.low_stock_threshold,
            encoding: self.pipeline_encoding,
            dedup_recipients: self.dedup_recipients,
            output: self.document_output(),
        }
    }
}

/// An unparsable threshold falls back to the default instead of aborting startup.
fn threshold<F>(lookup: &F) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("LOW_STOCK_THRESHOLD") {
        None => DEFAULT_LOW_STOCK_THRESHOLD,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(
                "LOW_STOCK_THRESHOLD={:?} is not an integer, using {}",
                raw, DEFAULT_LOW_STOCK_THRESHOLD
            );
            DEFAULT_LOW_STOCK_THRESHOLD
        }),
    }
}

fn parse_optional<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::Invalid {
                    key,
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected a boolean".to_string(),
        }),
    }
}
