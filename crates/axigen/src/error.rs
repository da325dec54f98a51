//! Error types for the Axigen connector

/// Result type alias using the connector's error type
pub type Result<T> = std::result::Result<T, AxigenError>;

/// Errors surfaced by the client, actions and trigger
#[derive(Debug, thiserror::Error)]
pub enum AxigenError {
    /// Login request failed (bad credentials, unreachable server, bad reply)
    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    /// Non-2xx response from an authenticated call
    #[error("Request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    /// Network or timeout error from the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Action or trigger input is missing or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Credentials or configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key/value store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl AxigenError {
    /// Build a request error from a status and raw body bytes
    pub(crate) fn request(status: u16, body: &[u8]) -> Self {
        AxigenError::Request {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Whether this error came from the login step
    pub fn is_authentication(&self) -> bool {
        matches!(self, AxigenError::Authentication { .. })
    }
}

impl From<ureq::Error> for AxigenError {
    fn from(err: ureq::Error) -> Self {
        AxigenError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for AxigenError {
    fn from(err: url::ParseError) -> Self {
        AxigenError::Config(format!("invalid server URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_keeps_body_text() {
        let err = AxigenError::request(403, b"forbidden");
        assert_eq!(err.to_string(), "Request failed with status 403: forbidden");
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_authentication_error() {
        let err = AxigenError::Authentication {
            reason: "status 401".to_string(),
        };
        assert!(err.is_authentication());
    }
}
