use crate::constants::message;
use crate::headers::Headers;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// What one probe phase observed: the response as captured off the wire plus
/// the authorization verdict derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseOutcome {
    /// Response status, or `None` when the phase never produced a response.
    pub status: Option<u16>,
    /// Response headers in observed order.
    pub headers: Headers,
    /// Whether `Access-Control-Allow-Origin` was present (case-insensitive).
    pub cors_header_present: bool,
    /// Value of `Access-Control-Allow-Origin` when present.
    pub allowed_origin: Option<String>,
    /// Whether the probed origin is covered by `allowed_origin`.
    pub origin_authorized: bool,
}

impl PhaseOutcome {
    /// True when this phase both advertised CORS and covered the origin.
    pub fn authorized(&self) -> bool {
        self.cors_header_present && self.origin_authorized
    }

    /// True once a response was observed for this phase.
    pub fn reached(&self) -> bool {
        self.status.is_some()
    }
}

/// Aggregate verdict of a two-phase probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub success: bool,
    pub message: String,
    pub preflight: PhaseOutcome,
    pub actual: PhaseOutcome,
    pub error: Option<ProbeError>,
}

impl ProbeResult {
    /// Combines two completed phases into the final verdict.
    pub(crate) fn evaluated(preflight: PhaseOutcome, actual: PhaseOutcome) -> Self {
        let success = preflight.authorized() && actual.authorized();
        let message = if success {
            message::CONFIGURED
        } else {
            message::NOT_CONFIGURED
        };

        Self {
            success,
            message: message.into(),
            preflight,
            actual,
            error: None,
        }
    }

    /// Terminates the probe early, keeping whatever the phases already
    /// observed. Phases never reached stay in their default state.
    pub(crate) fn aborted(error: ProbeError, preflight: PhaseOutcome) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            preflight,
            actual: PhaseOutcome::default(),
            error: Some(error),
        }
    }
}

/// Why a probe could not run to completion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("target '{0}' is not a valid URL; include http:// or https://")]
    InvalidTarget(String),

    #[error("origin '{0}' is not a valid URL; include http:// or https://")]
    InvalidOrigin(String),

    #[error("request to {target} timed out after {limit:?}")]
    Timeout { target: String, limit: Duration },

    #[error("failed to connect to {target}: {detail}")]
    Connection { target: String, detail: String },

    #[error("request failed: {detail}")]
    Transport { detail: String },
}

impl Serialize for ProbeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
