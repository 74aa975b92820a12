//! Default [`HttpTransport`] backed by `reqwest`

use std::io;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{header, Client, Method};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

use crate::config::TransportConfig;
use crate::error::{SoapError, TransportError};
use crate::request::{ControlRequest, HttpMethod};
use crate::transport::{HttpTransport, TransportResponse};

/// HTTP transport using a pooled `reqwest` client
///
/// Non-success statuses are reported as [`TransportError::Status`] after the
/// error body has been logged. Successful bodies are streamed, not buffered.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> crate::Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> crate::Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_idle_timeout(config.pool_idle_timeout);
        if config.title_case_headers {
            builder = builder.http1_title_case_headers();
        }

        let client = builder
            .build()
            .map_err(|e| SoapError::Transport(TransportError::Request(e.to_string())))?;

        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with other parts of an application
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn perform(
        &self,
        request: ControlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransportResponse, TransportError> {
        let ControlRequest {
            method,
            url,
            headers,
            body,
            content_type,
            user_agent,
            log_request,
        } = request;

        if log_request {
            if let Some(body) = &body {
                tracing::debug!("{} {} request body: {}", method, url, body);
            }
        }

        let mut builder = self
            .client
            .request(to_reqwest_method(method)?, &url)
            .header(header::USER_AGENT, user_agent);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let send = builder.send();
        let response = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(TransportError::Cancelled),
                response = send => response,
            },
            None => send.await,
        }
        .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!("{} {} returned HTTP {}: {}", method, url, status.as_u16(), error_body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let stream = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));

        Ok(TransportResponse::new(
            status.as_u16(),
            Box::pin(StreamReader::new(stream)),
        ))
    }
}

fn to_reqwest_method(method: HttpMethod) -> Result<Method, TransportError> {
    match method {
        HttpMethod::Get => Ok(Method::GET),
        HttpMethod::Post => Ok(Method::POST),
        HttpMethod::Subscribe => Method::from_bytes(method.as_str().as_bytes())
            .map_err(|e| TransportError::Request(e.to_string())),
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(HttpMethod::Get).unwrap(), Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post).unwrap(), Method::POST);
        assert_eq!(
            to_reqwest_method(HttpMethod::Subscribe).unwrap().as_str(),
            "SUBSCRIBE"
        );
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
        assert!(ReqwestTransport::with_config(TransportConfig::new().with_title_case_headers(false)).is_ok());
        let _shared = ReqwestTransport::with_client(Client::new());
    }
}
