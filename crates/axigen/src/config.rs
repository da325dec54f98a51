//! Credential loading for the Axigen connector
//!
//! Supports loading credentials from (in order of priority):
//! 1. An explicit JSON file
//! 2. The config directory (~/.config/axigen/credentials.json)
//! 3. Runtime environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::AxigenError;

/// Credentials filename in the config directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// Path appended to the server URL for every API call
const API_PATH: &str = "/api/v1";

pub const SERVER_ENV: &str = "AXIGEN_SERVER";
pub const USERNAME_ENV: &str = "AXIGEN_USERNAME";
pub const PASSWORD_ENV: &str = "AXIGEN_PASSWORD";

/// Credentials for one Axigen webmail account
///
/// Supplied per invocation and never persisted by the client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxigenCredentials {
    /// Webmail server URL, e.g. `https://mail.example.com`
    pub server: String,
    /// Email address used to log in
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AxigenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxigenCredentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AxigenCredentials {
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Base URL of the REST API (`{server}/api/v1`)
    ///
    /// The server must be an absolute http(s) URL.
    pub fn base_url(&self) -> crate::Result<String> {
        let server = self.server.trim().trim_end_matches('/');
        let parsed = Url::parse(server)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AxigenError::Config(format!(
                "unsupported server URL scheme: {}",
                parsed.scheme()
            )));
        }
        Ok(format!("{}{}", server, API_PATH))
    }

    /// Load credentials using the following priority:
    /// 1. JSON file (~/.config/axigen/credentials.json)
    /// 2. Runtime environment variables
    pub fn load() -> Result<Self> {
        if config::config_exists(CREDENTIALS_FILE) {
            return config::load_json(CREDENTIALS_FILE);
        }

        Self::from_env()
    }

    /// Load credentials from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse credentials from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse credentials JSON")
    }

    /// Load credentials from environment variables
    pub fn from_env() -> Result<Self> {
        let server = std::env::var(SERVER_ENV)
            .with_context(|| format!("{} environment variable not set", SERVER_ENV))?;
        let username = std::env::var(USERNAME_ENV)
            .with_context(|| format!("{} environment variable not set", USERNAME_ENV))?;
        let password = std::env::var(PASSWORD_ENV)
            .with_context(|| format!("{} environment variable not set", PASSWORD_ENV))?;

        Ok(Self::new(server, username, password))
    }

    /// Save credentials to the config directory
    pub fn save(&self) -> Result<()> {
        config::save_json(CREDENTIALS_FILE, self)
    }

    /// Get the default credentials file path (~/.config/axigen/credentials.json)
    pub fn default_credentials_path() -> Option<PathBuf> {
        config::config_path(CREDENTIALS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials() {
        let json = r#"{
            "server": "https://mail.example.com",
            "username": "john.doe@example.com",
            "password": "hunter2"
        }"#;

        let creds = AxigenCredentials::from_json(json).unwrap();
        assert_eq!(creds.server, "https://mail.example.com");
        assert_eq!(creds.username, "john.doe@example.com");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn test_missing_field() {
        let json = r#"{ "server": "https://mail.example.com" }"#;
        assert!(AxigenCredentials::from_json(json).is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let creds = AxigenCredentials::new("https://mail.example.com/", "a@b.c", "pw");
        assert_eq!(creds.base_url().unwrap(), "https://mail.example.com/api/v1");
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        let creds = AxigenCredentials::new("not a url", "a@b.c", "pw");
        assert!(matches!(creds.base_url(), Err(AxigenError::Config(_))));

        let creds = AxigenCredentials::new("ftp://mail.example.com", "a@b.c", "pw");
        assert!(matches!(creds.base_url(), Err(AxigenError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = AxigenCredentials::new("https://mail.example.com", "a@b.c", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
