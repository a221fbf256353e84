use url::Url;

/// Returns true iff `value` parses as an absolute URL with a non-empty host.
///
/// Scheme-less strings ("example.com"), relative paths, and host-less schemes
/// ("mailto:user@example.com") are all rejected. Never touches the network.
pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| url.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
