//! Credential declaration and validation

use log::warn;
use serde::Serialize;
use std::sync::Arc;

use crate::client::{AxigenClient, Transport};
use crate::config::AxigenCredentials;
use crate::props::PropertyDef;

/// Message shown to the user when validation fails
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Outcome of a credential check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthValidation {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Inputs the host collects to authenticate
pub fn auth_props() -> Vec<PropertyDef> {
    vec![
        PropertyDef::short_text("server", "Server URL", "Your Axigen webmail server URL").required(),
        PropertyDef::short_text("username", "Email Address", "Your email address").required(),
        PropertyDef::secret_text("password", "Password", "Your password").required(),
    ]
}

/// Log in once with the given credentials
///
/// Never returns an error: any failure becomes an invalid result.
pub fn validate_credentials(credentials: &AxigenCredentials, transport: Arc<dyn Transport>) -> AuthValidation {
    let result = AxigenClient::new(credentials.clone(), transport).and_then(|client| client.start_session());

    match result {
        Ok(_) => AuthValidation::valid(),
        Err(e) => {
            warn!("Credential validation failed for {}: {}", credentials.username, e);
            AuthValidation::invalid(INVALID_CREDENTIALS)
        }
    }
}
