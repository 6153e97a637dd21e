use thiserror::Error;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Classified transport failure.
///
/// Variants carry owned strings rather than the underlying `reqwest::Error`
/// so a failure can be stored on a cache entry and cloned into snapshots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network unreachable: {0}")]
    Unreachable(String),

    #[error("Request rejected ({status}): {message}")]
    ClientRejected { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    ServerFault { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        let code = status.as_u16();
        if status.is_server_error() {
            ApiError::ServerFault {
                status: code,
                message: truncated,
            }
        } else {
            ApiError::ClientRejected {
                status: code,
                message: truncated,
            }
        }
    }

    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unreachable(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status, &err.to_string())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }

    /// Whether an automatic retry could plausibly succeed.
    ///
    /// 4xx responses are excluded: retrying a malformed or unauthorized
    /// request will not change the answer. Timeouts and 5xx are expected
    /// transients while backend services warm up.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::ClientRejected { .. })
    }
}
