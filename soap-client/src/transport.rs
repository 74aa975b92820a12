//! The HTTP capability the control client is built on
//!
//! The client never talks to sockets itself. Anything that can execute a
//! [`ControlRequest`] and hand back a body stream can drive it, which keeps the
//! client testable against in-memory stubs.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::request::ControlRequest;

/// Response body positioned at its first byte
///
/// Dropping the body releases the stream and its connection.
pub type ResponseBody = Pin<Box<dyn AsyncRead + Send>>;

/// Status and body of a completed exchange
pub struct TransportResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl TransportResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Executes HTTP exchanges on behalf of the control client
///
/// Implementations must be safe for concurrent use: the client issues calls
/// from many tasks without any serialization of its own. When a cancellation
/// token is supplied the transport must observe it while waiting on I/O and
/// report [`TransportError::Cancelled`] once it fires.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn perform(
        &self,
        request: ControlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransportResponse, TransportError>;
}
