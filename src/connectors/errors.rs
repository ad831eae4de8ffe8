use std::fmt;

/// Errors that can occur during communication with the platform.
///
/// Every failure a remote step can hit collapses into one of these values at
/// its origin; nothing else crosses into the orchestrator's control flow.
#[derive(Debug)]
pub enum ConnectorError {
    /// HTTP request/response error
    Http(String),
    /// Service unreachable or timeout
    ServiceUnavailable(String),
    /// Response body did not parse into the expected shape
    InvalidResponse(String),
    /// Authentication rejected (401/403)
    Unauthorized(String),
    /// Any other status the endpoint is not expected to return
    UnexpectedStatus { status: u16, body: String },
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::UnexpectedStatus { status, body } => {
                write!(f, "Unexpected status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for ConnectorError {}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else {
            Self::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_status() {
        let err = ConnectorError::UnexpectedStatus {
            status: 500,
            body: "oops".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("500"), "got: {msg}");
        assert!(msg.contains("oops"), "got: {msg}");
    }

    #[test]
    fn display_unauthorized() {
        let err = ConnectorError::Unauthorized("invalid_client".to_string());
        assert!(format!("{err}").contains("Unauthorized"));
    }
}
