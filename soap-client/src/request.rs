//! Request values handed to the transport
//!
//! Every operation builds a fresh [`ControlRequest`]; nothing is shared between
//! calls.

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::*;

/// HTTP verbs used by UPnP control and eventing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    /// GENA subscription verb
    Subscribe,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Subscribe => "SUBSCRIBE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single HTTP exchange as the transport should perform it
///
/// Header names are kept exactly as given; UPnP devices are not always
/// case-insensitive about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    pub method: HttpMethod,
    /// Absolute request URL
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: &'static str,
    /// Whether the transport should capture the request for diagnostics
    pub log_request: bool,
}

impl ControlRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
            content_type: None,
            user_agent: USER_AGENT,
            log_request: true,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn body(mut self, content_type: &str, body: impl Into<String>) -> Self {
        self.content_type = Some(content_type.to_string());
        self.body = Some(body.into());
        self
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// SOAP action POST
    pub(crate) fn soap_action(
        url: String,
        soap_action: &str,
        payload: &str,
        options: &CommandOptions,
    ) -> Self {
        let mut request = ControlRequest::new(HttpMethod::Post, url)
            .header(SOAP_ACTION_HEADER, quote_soap_action(soap_action))
            .header(PRAGMA_HEADER, PRAGMA_NO_CACHE)
            .header(FRIENDLY_NAME_HEADER, FRIENDLY_NAME)
            .body(SOAP_CONTENT_TYPE, payload);

        if let Some(features) = options.content_features.as_deref().filter(|f| !f.is_empty()) {
            request = request.header(CONTENT_FEATURES_HEADER, features);
        }

        request.log_request = options.log_request;
        request
    }

    /// GENA SUBSCRIBE registering `callback_host:callback_port` for events
    pub(crate) fn subscribe(
        url: &str,
        remote_host: &str,
        remote_port: u16,
        callback_host: &str,
        callback_port: u16,
        timeout_seconds: u32,
    ) -> Self {
        ControlRequest::new(HttpMethod::Subscribe, url)
            .header(HOST_HEADER, format!("{}:{}", remote_host, remote_port))
            .header(
                CALLBACK_HEADER,
                format!("<{}:{}>", callback_host, callback_port),
            )
            .header(NT_HEADER, NT_UPNP_EVENT)
            .header(TIMEOUT_HEADER, format!("Second-{}", timeout_seconds))
    }

    /// Plain GET for description documents
    pub(crate) fn document(url: &str) -> Self {
        ControlRequest::new(HttpMethod::Get, url).header(FRIENDLY_NAME_HEADER, FRIENDLY_NAME)
    }
}

/// Optional parameters of [`ControlClient::send_command_with`](crate::ControlClient::send_command_with)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// Let the transport capture the request body for diagnostics
    pub log_request: bool,
    /// Value for the `contentFeatures.dlna.org` header, if any
    pub content_features: Option<String>,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            log_request: true,
            content_features: None,
        }
    }
}

impl CommandOptions {
    pub fn with_content_features(mut self, features: impl Into<String>) -> Self {
        self.content_features = Some(features.into());
        self
    }

    pub fn without_request_logging(mut self) -> Self {
        self.log_request = false;
        self
    }
}

fn quote_soap_action(action: &str) -> String {
    if action.starts_with('"') {
        action.to_string()
    } else {
        format!("\"{}\"", action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_action_request() {
        let options = CommandOptions::default();
        let request = ControlRequest::soap_action(
            "http://10.0.0.5:1400/ctl".to_string(),
            "urn:x:Test:1#Play",
            "<s:Envelope/>",
            &options,
        );

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.get_header("SOAPAction"), Some("\"urn:x:Test:1#Play\""));
        assert_eq!(request.get_header("Pragma"), Some("no-cache"));
        assert_eq!(request.get_header("FriendlyName.DLNA.ORG"), Some(FRIENDLY_NAME));
        assert_eq!(request.get_header("contentFeatures.dlna.org"), None);
        assert_eq!(request.content_type.as_deref(), Some("text/xml"));
        assert_eq!(request.body.as_deref(), Some("<s:Envelope/>"));
        assert_eq!(request.user_agent, USER_AGENT);
        assert!(request.log_request);
    }

    #[test]
    fn test_soap_action_is_quoted_once() {
        assert_eq!(quote_soap_action("urn:x:Test:1#Play"), "\"urn:x:Test:1#Play\"");
        assert_eq!(quote_soap_action("\"urn:x:Test:1#Play\""), "\"urn:x:Test:1#Play\"");
    }

    #[test]
    fn test_content_features_header() {
        let options = CommandOptions::default()
            .with_content_features("DLNA.ORG_PN=MP3;DLNA.ORG_OP=01")
            .without_request_logging();
        let request = ControlRequest::soap_action("http://h/ctl".into(), "a#b", "", &options);

        assert_eq!(
            request.get_header("contentFeatures.dlna.org"),
            Some("DLNA.ORG_PN=MP3;DLNA.ORG_OP=01")
        );
        assert!(!request.log_request);

        let empty = CommandOptions::default().with_content_features("");
        let request = ControlRequest::soap_action("http://h/ctl".into(), "a#b", "", &empty);
        assert_eq!(request.get_header("contentFeatures.dlna.org"), None);
    }

    #[test]
    fn test_subscribe_request() {
        let request = ControlRequest::subscribe(
            "http://10.0.0.5:1400/evt",
            "10.0.0.5",
            1400,
            "10.0.0.9",
            8080,
            1800,
        );

        assert_eq!(request.method.as_str(), "SUBSCRIBE");
        assert_eq!(request.get_header("HOST"), Some("10.0.0.5:1400"));
        assert_eq!(request.get_header("CALLBACK"), Some("<10.0.0.9:8080>"));
        assert_eq!(request.get_header("NT"), Some("upnp:event"));
        assert_eq!(request.get_header("TIMEOUT"), Some("Second-1800"));
        assert_eq!(request.get_header("FriendlyName.DLNA.ORG"), None);
        assert!(request.body.is_none());
        assert!(request.content_type.is_none());
    }

    #[test]
    fn test_document_request() {
        let request = ControlRequest::document("http://10.0.0.5:1400/xml/device_description.xml");

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.get_header("FriendlyName.DLNA.ORG"), Some(FRIENDLY_NAME));
        assert_eq!(request.headers.len(), 1);
        assert!(request.body.is_none());
    }
}
