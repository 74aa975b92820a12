//! Control URL resolution

/// Resolve a service URL reported by a device against the device's base URL.
///
/// URLs already starting with `http` (any case) are returned unchanged. Anything
/// else is treated as a path, anchored with a leading `/` when missing, and
/// appended to `base_url` by plain concatenation. Doubled slashes are left as is;
/// some renderers rely on the URL being passed through verbatim.
pub fn normalize_service_url(base_url: &str, service_url: &str) -> String {
    let is_absolute = service_url
        .get(..4)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http"));
    if is_absolute {
        return service_url.to_string();
    }

    if service_url.starts_with('/') {
        format!("{}{}", base_url, service_url)
    } else {
        format!("{}/{}", base_url, service_url)
    }
}
