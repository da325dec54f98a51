//! Session bootstrap for the Axigen API
//!
//! Every request carries a Basic `Authorization` header. The first privileged
//! call additionally logs in and caches the returned session ID, which is
//! sent as `X-Axigen-Session` on every later request of the same client.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};

use super::api::LoginResponse;
use super::transport::{HttpRequest, Method, Transport};
use crate::config::AxigenCredentials;
use crate::error::{AxigenError, Result};

/// Header carrying the cached session ID
pub const SESSION_HEADER: &str = "X-Axigen-Session";

/// Holds credentials and the at-most-one session token of a client
pub struct SessionManager {
    credentials: AxigenCredentials,
    base_url: String,
    token: Option<String>,
}

impl SessionManager {
    /// Create a session manager with no session yet
    ///
    /// Fails if the server URL is not usable.
    pub fn new(credentials: AxigenCredentials) -> Result<Self> {
        let base_url = credentials.base_url()?;
        Ok(Self {
            credentials,
            base_url,
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &AxigenCredentials {
        &self.credentials
    }

    /// Basic auth header computed from the stored credentials
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        let raw = format!("{}:{}", self.credentials.username, self.credentials.password);
        vec![(
            "Authorization".to_string(),
            format!("Basic {}", STANDARD.encode(raw)),
        )]
    }

    /// Auth headers plus the session header once a session exists
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.auth_headers();
        if let Some(token) = &self.token {
            headers.push((SESSION_HEADER.to_string(), token.clone()));
        }
        headers
    }

    pub fn current_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in unless a session is already cached
    pub fn ensure_session(&mut self, transport: &dyn Transport) -> Result<()> {
        if self.token.is_some() {
            return Ok(());
        }

        let login = self.start_session(transport)?;
        info!("Started Axigen session for {}", self.credentials.username);
        self.token = Some(login.sessid);
        Ok(())
    }

    /// Perform the login request without caching the result
    ///
    /// Any failure (transport, non-2xx status, undecodable reply) is
    /// reported as an authentication error.
    pub fn start_session(&self, transport: &dyn Transport) -> Result<LoginResponse> {
        debug!("Logging in to {}", self.base_url);

        let request = HttpRequest::new(Method::Post, format!("{}/login", self.base_url))
            .headers(self.auth_headers());

        let response = transport.send(request).map_err(|e| AxigenError::Authentication {
            reason: e.to_string(),
        })?;

        if !response.is_success() {
            return Err(AxigenError::Authentication {
                reason: format!("login returned status {}", response.status),
            });
        }

        response
            .json::<LoginResponse>()
            .map_err(|e| AxigenError::Authentication {
                reason: format!("unexpected login response: {}", e),
            })
    }
}
