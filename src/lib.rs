//! Business idea generator: a single-form web UI in front of a
//! chat-completion API.

pub mod core;
pub mod form;
pub mod models;
pub mod prompt;
pub mod types;
pub mod web;

pub use crate::core::{ApiKey, AppConfig, GenerationResult, IdeaClient, Mailer};
pub use form::{FormError, FormSubmission, UserInputs};
pub use web::start_web_server;
