//! Service descriptors read from a device description

use crate::error::{Result, SoapError};
use crate::url::normalize_service_url;

/// One controllable service on a remote device
///
/// Produced by whatever parses the device description; the client only reads it.
/// `control_url`, `event_sub_url` and `scpd_url` may be absolute or relative to
/// the device base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceService {
    /// Service type URN, e.g. `urn:schemas-upnp-org:service:AVTransport:1`
    pub service_type: String,
    /// Where SOAP actions are posted
    pub control_url: String,
    pub service_id: String,
    /// Service description (SCPD) location
    pub scpd_url: String,
    /// Eventing endpoint for SUBSCRIBE
    pub event_sub_url: String,
}

impl DeviceService {
    pub fn new(service_type: impl Into<String>, control_url: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            control_url: control_url.into(),
            ..Self::default()
        }
    }

    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = service_id.into();
        self
    }

    pub fn with_scpd_url(mut self, scpd_url: impl Into<String>) -> Self {
        self.scpd_url = scpd_url.into();
        self
    }

    pub fn with_event_sub_url(mut self, event_sub_url: impl Into<String>) -> Self {
        self.event_sub_url = event_sub_url.into();
        self
    }

    /// Check the fields needed to issue a SOAP action
    pub fn validate(&self) -> Result<()> {
        if self.service_type.is_empty() {
            return Err(SoapError::invalid("service type"));
        }
        if self.control_url.is_empty() {
            return Err(SoapError::invalid("control URL"));
        }
        Ok(())
    }

    pub fn control_url_for(&self, base_url: &str) -> String {
        normalize_service_url(base_url, &self.control_url)
    }

    pub fn event_url_for(&self, base_url: &str) -> String {
        normalize_service_url(base_url, &self.event_sub_url)
    }

    pub fn scpd_url_for(&self, base_url: &str) -> String {
        normalize_service_url(base_url, &self.scpd_url)
    }
}
