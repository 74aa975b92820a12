//! Configuration for the default HTTP transport
//!
//! Only connection behavior is configurable. User agent, friendly name and the
//! other wire constants are fixed (see [`constants`](crate::constants)).

use std::time::Duration;

/// Settings for [`ReqwestTransport`](crate::ReqwestTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Timeout for establishing a connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Timeout for a whole exchange, body included
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// How long idle pooled connections are kept
    /// Default: 90 seconds
    pub pool_idle_timeout: Duration,

    /// Send header names in Title-Case (`Soapaction`, `Host`) instead of
    /// lowercase; some renderers do not match lowercase names.
    /// Default: true
    pub title_case_headers: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            title_case_headers: true,
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    pub fn with_title_case_headers(mut self, enabled: bool) -> Self {
        self.title_case_headers = enabled;
        self
    }
}
