use crate::constants::method;
use crate::headers::HeaderSpec;
use crate::probe::CorsProbe;
use crate::report;
use crate::request::{DEFAULT_TIMEOUT, ProbeRequest};
use serde::Deserialize;
use std::time::Duration;

/// Parameters accepted by the `check_cors` tool surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    /// Origin the request pretends to come from.
    pub origin: String,
    /// URL the probe is sent to.
    pub target: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Comma-delimited header tokens, each `name: value` or a bare name.
    #[serde(default)]
    pub headers: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
    #[serde(default)]
    pub verbose: bool,
}

fn default_method() -> String {
    method::GET.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// Runs a probe from tool-call parameters and renders the outcome as text.
///
/// Every failure comes back as rendered text; the call never returns an error
/// across the tool boundary.
pub async fn check_cors(probe: &CorsProbe, request: ToolRequest) -> String {
    let ToolRequest {
        origin,
        target,
        method,
        headers,
        timeout,
        verbose,
    } = request;

    let mut probe_request = ProbeRequest::new(origin, target);
    probe_request.method = method;
    probe_request.timeout = Duration::from_secs(timeout);
    if let Some(tokens) = headers {
        probe_request.headers = HeaderSpec::from_list(&tokens);
    }

    let result = probe.check(&probe_request).await;

    if verbose {
        report::render_trace(&probe_request, &result)
    } else {
        report::summary(&result).to_string()
    }
}

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;
