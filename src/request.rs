use crate::constants::method;
use crate::headers::HeaderSpec;
use std::time::Duration;

/// Deadline applied to each probe phase when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One cross-origin authorization check: where the request would come from,
/// where it would go, and how it would be shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub origin: String,
    pub target: String,
    pub method: String,
    pub headers: HeaderSpec,
    pub timeout: Duration,
}

impl ProbeRequest {
    pub fn new<O, T>(origin: O, target: T) -> Self
    where
        O: Into<String>,
        T: Into<String>,
    {
        Self {
            origin: origin.into(),
            target: target.into(),
            ..Self::default()
        }
    }
}

impl Default for ProbeRequest {
    fn default() -> Self {
        Self {
            origin: String::new(),
            target: String::new(),
            method: method::GET.into(),
            headers: HeaderSpec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;
