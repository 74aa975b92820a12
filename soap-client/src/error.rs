//! Error types for the control client

use thiserror::Error;

/// Failures reported by an [`HttpTransport`](crate::HttpTransport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The exchange did not complete within the transport's deadline
    #[error("Request timed out")]
    Timeout,

    /// The device answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The cancellation token fired before the exchange completed
    #[error("Request cancelled")]
    Cancelled,

    /// Reading the response body failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other request failure (invalid method, malformed header, ...)
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors returned by [`ControlClient`](crate::ControlClient) operations
#[derive(Debug, Error)]
pub enum SoapError {
    /// Network or HTTP communication error
    #[error("Transport error: {0}")]
    Transport(TransportError),

    /// The caller's cancellation token fired
    #[error("Operation cancelled")]
    Cancelled,

    /// The response body is not well-formed XML
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The caller passed an empty or malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SoapError {
    pub(crate) fn invalid(what: &str) -> Self {
        Self::InvalidArgument(format!("{} must not be empty", what))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<TransportError> for SoapError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Cancelled => SoapError::Cancelled,
            other => SoapError::Transport(other),
        }
    }
}

/// Type alias for results that can return a SoapError
pub type Result<T> = std::result::Result<T, SoapError>;
