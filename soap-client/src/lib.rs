//! UPnP/DLNA control client
//!
//! This crate provides the protocol layer for talking to DLNA media renderers:
//! SOAP action invocation, GENA event subscription (SUBSCRIBE) and retrieval of
//! device/service description documents. Responses are returned as generic XML
//! documents; interpreting them for a particular service is left to the caller.
//!
//! HTTP itself goes through the [`HttpTransport`] trait. The default
//! [`ReqwestTransport`] (feature `reqwest-transport`) covers normal use; tests
//! and embedders can supply their own.
//!
//! ```rust,no_run
//! use soap_client::{ControlClient, DeviceService};
//! use soap_client::CancellationToken;
//!
//! # async fn run() -> soap_client::Result<()> {
//! let client = ControlClient::with_default_transport()?;
//!
//! let description = client
//!     .get_data("http://192.168.1.100:1400/xml/device_description.xml", &CancellationToken::new())
//!     .await?;
//! println!("{:?}", description.find("friendlyName"));
//!
//! let service = DeviceService::new(
//!     "urn:schemas-upnp-org:service:AVTransport:1",
//!     "/MediaRenderer/AVTransport/Control",
//! )
//! .with_event_sub_url("/MediaRenderer/AVTransport/Event");
//!
//! client
//!     .subscribe(
//!         &service.event_url_for("http://192.168.1.100:1400"),
//!         "192.168.1.100",
//!         1400,
//!         "192.168.1.50",
//!         3400,
//!         soap_client::constants::DEFAULT_SUBSCRIPTION_TIMEOUT_SECS,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod document;
mod error;
#[cfg(feature = "reqwest-transport")]
mod http;
mod request;
mod service;
mod transport;
mod url;

pub mod constants;
pub mod logging;

pub use client::ControlClient;
pub use config::TransportConfig;
pub use document::ResponseDocument;
pub use error::{Result, SoapError, TransportError};
#[cfg(feature = "reqwest-transport")]
pub use http::ReqwestTransport;
pub use request::{CommandOptions, ControlRequest, HttpMethod};
pub use service::DeviceService;
pub use transport::{HttpTransport, ResponseBody, TransportResponse};
pub use url::normalize_service_url;

pub use tokio_util::sync::CancellationToken;
pub use xmltree;
