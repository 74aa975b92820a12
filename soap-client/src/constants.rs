//! Wire-level constants shared by every request the client issues.
//!
//! Renderers sniff several of these values, so they are fixed literals rather
//! than configuration.

/// User agent sent with every request.
pub const USER_AGENT: &str = "Microsoft-Windows/6.2 UPnP/1.0 Microsoft-DLNA DLNADOC/1.50";

/// Client identification carried in [`FRIENDLY_NAME_HEADER`].
pub const FRIENDLY_NAME: &str = "Jellyfin";

/// Header carrying [`FRIENDLY_NAME`] on GET and POST requests.
pub const FRIENDLY_NAME_HEADER: &str = "FriendlyName.DLNA.ORG";

/// Content type of SOAP request bodies.
pub const SOAP_CONTENT_TYPE: &str = "text/xml";

pub const SOAP_ACTION_HEADER: &str = "SOAPAction";
pub const PRAGMA_HEADER: &str = "Pragma";
pub const PRAGMA_NO_CACHE: &str = "no-cache";

/// Optional DLNA content features header on SOAP requests.
pub const CONTENT_FEATURES_HEADER: &str = "contentFeatures.dlna.org";

// GENA subscription headers
pub const HOST_HEADER: &str = "HOST";
pub const CALLBACK_HEADER: &str = "CALLBACK";
pub const NT_HEADER: &str = "NT";
pub const TIMEOUT_HEADER: &str = "TIMEOUT";

/// Notification type for UPnP eventing.
pub const NT_UPNP_EVENT: &str = "upnp:event";

/// Subscription lifetime requested when the caller has no preference.
pub const DEFAULT_SUBSCRIPTION_TIMEOUT_SECS: u32 = 3600;
