// src/core/mod.rs
//! Outbound client, report rendering, mail delivery and server configuration

pub mod config_manager;
pub mod idea_client;
pub mod mailer;
pub mod report;

pub use config_manager::{AppConfig, ConfigManager, ConfigSource, SmtpConfig};
pub use idea_client::{ApiKey, GenerationResult, IdeaClient};
pub use mailer::{MailError, Mailer};
pub use report::render_pdf;
