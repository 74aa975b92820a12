use std::sync::Arc;
use std::time::Instant;

use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

use crate::document::ResponseDocument;
use crate::error::{Result, SoapError, TransportError};
use crate::request::{CommandOptions, ControlRequest};
use crate::service::DeviceService;
use crate::transport::{HttpTransport, ResponseBody};

/// Client for UPnP control, eventing and description retrieval
///
/// Holds nothing but the transport, so a single instance (or any number of
/// clones) can be used from many tasks at once. Every call builds its own
/// request, and response streams are released before the call returns, whether
/// or not the body parsed.
///
/// # Example
///
/// ```rust,no_run
/// use soap_client::{ControlClient, DeviceService};
///
/// # async fn run() -> soap_client::Result<()> {
/// let client = ControlClient::with_default_transport()?;
/// let service = DeviceService::new(
///     "urn:schemas-upnp-org:service:AVTransport:1",
///     "/MediaRenderer/AVTransport/Control",
/// );
/// let envelope = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">...</s:Envelope>"#;
///
/// let response = client
///     .send_command("http://192.168.1.100:1400", &service, "Play", envelope)
///     .await?;
/// println!("{:?}", response.find("PlayResponse"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ControlClient {
    transport: Arc<dyn HttpTransport>,
}

impl ControlClient {
    /// Create a client on top of an injected transport
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Create a client backed by [`ReqwestTransport`](crate::ReqwestTransport)
    /// with default settings
    #[cfg(feature = "reqwest-transport")]
    pub fn with_default_transport() -> Result<Self> {
        Self::with_config(crate::TransportConfig::default())
    }

    #[cfg(feature = "reqwest-transport")]
    pub fn with_config(config: crate::TransportConfig) -> Result<Self> {
        let transport = crate::ReqwestTransport::with_config(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Invoke a SOAP action with default options
    ///
    /// See [`send_command_with`](Self::send_command_with).
    pub async fn send_command(
        &self,
        base_url: &str,
        service: &DeviceService,
        command: &str,
        payload: &str,
    ) -> Result<ResponseDocument> {
        self.send_command_with(base_url, service, command, payload, &CommandOptions::default())
            .await
    }

    /// Invoke a SOAP action on a device service
    ///
    /// # Arguments
    /// * `base_url` - Device root URL, e.g. `http://192.168.1.100:1400`
    /// * `service` - Target service; its control URL is resolved against `base_url`
    /// * `command` - Action name, e.g. `Play`
    /// * `payload` - Complete SOAP envelope built by the caller
    /// * `options` - Request logging and the optional DLNA content features header
    ///
    /// # Returns
    /// The whole response document. SOAP faults are not interpreted here.
    pub async fn send_command_with(
        &self,
        base_url: &str,
        service: &DeviceService,
        command: &str,
        payload: &str,
        options: &CommandOptions,
    ) -> Result<ResponseDocument> {
        require(base_url, "base URL")?;
        service.validate()?;
        require(command, "command name")?;

        let url = service.control_url_for(base_url);
        let soap_action = format!("{}#{}", service.service_type, command);
        tracing::debug!("SOAP {} -> {} ({} bytes)", soap_action, url, payload.len());

        let request = ControlRequest::soap_action(url, &soap_action, payload, options);
        self.fetch_document(request, None).await
    }

    /// Register a callback for a service's event notifications
    ///
    /// Issues one SUBSCRIBE and discards the response body. The subscription is
    /// established only if this returns `Ok`; renewing it before
    /// `timeout_seconds` elapse is up to the caller.
    ///
    /// # Arguments
    /// * `url` - Absolute event subscription URL
    /// * `remote_host` / `remote_port` - Device address for the `HOST` header
    /// * `callback_host` / `callback_port` - Where NOTIFY requests should go
    /// * `timeout_seconds` - Requested lifetime, usually
    ///   [`DEFAULT_SUBSCRIPTION_TIMEOUT_SECS`](crate::constants::DEFAULT_SUBSCRIPTION_TIMEOUT_SECS)
    pub async fn subscribe(
        &self,
        url: &str,
        remote_host: &str,
        remote_port: u16,
        callback_host: &str,
        callback_port: u16,
        timeout_seconds: u32,
    ) -> Result<()> {
        require(url, "subscription URL")?;
        require(remote_host, "remote host")?;
        require(callback_host, "callback host")?;
        if timeout_seconds == 0 {
            return Err(SoapError::InvalidArgument(
                "subscription timeout must be positive".to_string(),
            ));
        }

        let request = ControlRequest::subscribe(
            url,
            remote_host,
            remote_port,
            callback_host,
            callback_port,
            timeout_seconds,
        );

        let response = self.transport.perform(request, None).await.map_err(|e| {
            tracing::warn!("SUBSCRIBE {} failed: {}", url, e);
            SoapError::from(e)
        })?;

        tracing::info!(
            "Subscribed to {} (HTTP {}), callback <{}:{}>, timeout {}s",
            url,
            response.status,
            callback_host,
            callback_port,
            timeout_seconds
        );
        drop(response);

        Ok(())
    }

    /// Fetch and parse a description document
    ///
    /// Returns [`SoapError::Cancelled`] if `cancel` fires before the body has
    /// been read in full.
    pub async fn get_data(&self, url: &str, cancel: &CancellationToken) -> Result<ResponseDocument> {
        require(url, "URL")?;
        if cancel.is_cancelled() {
            return Err(SoapError::Cancelled);
        }

        self.fetch_document(ControlRequest::document(url), Some(cancel))
            .await
    }

    async fn fetch_document(
        &self,
        request: ControlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<ResponseDocument> {
        let method = request.method;
        let url = request.url.clone();
        let start = Instant::now();

        let response = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(TransportError::Cancelled),
                response = self.transport.perform(request, Some(token)) => response,
            },
            None => self.transport.perform(request, None).await,
        };

        let response = response.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            SoapError::from(e)
        })?;
        let status = response.status;

        // The body is consumed (and dropped) inside read_body, before parsing.
        let bytes = read_body(response.body, cancel).await?;

        tracing::info!(
            "{} {} completed in {:?}: HTTP {} ({} bytes)",
            method,
            url,
            start.elapsed(),
            status,
            bytes.len()
        );

        ResponseDocument::from_bytes(&bytes).map_err(|e| {
            tracing::warn!("Unparseable response from {}: {}", url, e);
            e
        })
    }
}

impl std::fmt::Debug for ControlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlClient").finish_non_exhaustive()
    }
}

async fn read_body(mut body: ResponseBody, cancel: Option<&CancellationToken>) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let read = match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => return Err(SoapError::Cancelled),
            read = body.read_to_end(&mut bytes) => read,
        },
        None => body.read_to_end(&mut bytes).await,
    };
    read.map_err(TransportError::from)?;
    Ok(bytes)
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        Err(SoapError::invalid(what))
    } else {
        Ok(())
    }
}
