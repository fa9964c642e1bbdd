// src/core/config_manager.rs
//! Server configuration: defaults, optional config.yaml, then command-line overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::idea_client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub log_file: Option<PathBuf>,
    /// E-mail delivery is disabled when absent
    pub smtp: Option<SmtpConfig>,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub starttls: bool,
    pub username: String,
    pub password: String,
    /// Sender address, defaults to `username`
    #[serde(default)]
    pub from: Option<String>,
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("starttls", &self.starttls)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from", &self.from)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_file: None,
            smtp: None,
        }
    }
}

/// Where the configuration came from, reported once logging is up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration for the current environment.
    ///
    /// An explicitly named file must exist; the default `config.yaml` is optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<(AppConfig, ConfigSource)> {
        let environment = Self::get_environment();

        match explicit_path {
            Some(path) => Ok((
                Self::load_from_file(path, &environment)?,
                ConfigSource::File(path.to_path_buf()),
            )),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    let config = Self::load_from_file(&path, &environment)?;
                    Ok((config, ConfigSource::File(path)))
                } else {
                    Ok((AppConfig::default(), ConfigSource::Defaults))
                }
            }
        }
    }

    pub fn get_environment() -> String {
        std::env::var("IDEAS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse(content: &str, environment: &str) -> Result<AppConfig> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        let config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        if config.timeout_seconds == 0 {
            anyhow::bail!("timeout_seconds must be greater than zero");
        }

        Ok(config)
    }
}

impl AppConfig {
    pub fn with_overrides(mut self, port: Option<u16>, api_base_url: Option<String>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        self
    }

    /// Apply `EMAIL_USER` / `EMAIL_PASS`; both are needed to enable e-mail
    /// when the file has no `smtp` section.
    pub fn with_smtp_credentials(mut self, user: Option<String>, pass: Option<String>) -> Self {
        if let Some(smtp) = self.smtp.as_mut() {
            if let Some(user) = user {
                smtp.username = user;
            }
            if let Some(pass) = pass {
                smtp.password = pass;
            }
        } else if let (Some(username), Some(password)) = (user, pass) {
            self.smtp = Some(SmtpConfig {
                host: default_smtp_host(),
                port: None,
                starttls: false,
                username,
                password,
                from: None,
            });
        }
        self
    }
}
