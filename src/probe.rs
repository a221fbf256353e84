use crate::constants::{header, method};
use crate::headers::{self, Headers};
use crate::request::ProbeRequest;
use crate::result::{PhaseOutcome, ProbeError, ProbeResult};
use crate::validate::is_absolute_url;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

/// Two-phase CORS prober: an OPTIONS preflight exchange followed by the
/// actual request, each evaluated for `Access-Control-Allow-Origin` coverage.
#[derive(Debug, Clone)]
pub struct CorsProbe {
    client: Client,
}

impl CorsProbe {
    /// Builds a prober with its own connection pool.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Builds a prober on top of an existing client, sharing its pool.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Runs both phases against `request.target`.
    ///
    /// Failures never surface as `Err`: validation and transport errors ride
    /// inside the returned [`ProbeResult`] so every outcome renders the same
    /// way. The preflight must finish before the actual request is issued,
    /// and the first failure ends the probe with whatever the earlier phases
    /// observed.
    pub async fn check(&self, request: &ProbeRequest) -> ProbeResult {
        if !is_absolute_url(&request.target) {
            return ProbeResult::aborted(
                ProbeError::InvalidTarget(request.target.clone()),
                PhaseOutcome::default(),
            );
        }
        if !is_absolute_url(&request.origin) {
            return ProbeResult::aborted(
                ProbeError::InvalidOrigin(request.origin.clone()),
                PhaseOutcome::default(),
            );
        }

        let preflight = match self.preflight_phase(request).await {
            Ok(outcome) => outcome,
            Err(error) => return ProbeResult::aborted(error, PhaseOutcome::default()),
        };

        let actual = match self.actual_phase(request).await {
            Ok(outcome) => outcome,
            Err(error) => return ProbeResult::aborted(error, preflight),
        };

        ProbeResult::evaluated(preflight, actual)
    }

    async fn preflight_phase(&self, request: &ProbeRequest) -> Result<PhaseOutcome, ProbeError> {
        let mut headers = Headers::new();
        headers.insert(header::ORIGIN.into(), request.origin.clone());
        headers.insert(
            header::ACCESS_CONTROL_REQUEST_METHOD.into(),
            request.method.clone(),
        );
        if let Some(names) = request.headers.request_names() {
            headers.insert(header::ACCESS_CONTROL_REQUEST_HEADERS.into(), names);
        }

        debug!(url = %request.target, "sending OPTIONS preflight request");
        self.execute(method::OPTIONS, request, headers).await
    }

    async fn actual_phase(&self, request: &ProbeRequest) -> Result<PhaseOutcome, ProbeError> {
        let mut headers = Headers::new();
        headers.insert(header::ORIGIN.into(), request.origin.clone());
        // Custom headers land after the default Origin, so a custom Origin
        // token overwrites it.
        for (name, value) in request.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        debug!(url = %request.target, method = %request.method, "sending actual request");
        self.execute(&request.method, request, headers).await
    }

    async fn execute(
        &self,
        phase_method: &str,
        request: &ProbeRequest,
        headers: Headers,
    ) -> Result<PhaseOutcome, ProbeError> {
        let phase_method =
            Method::from_bytes(phase_method.as_bytes()).map_err(|_| ProbeError::Transport {
                detail: format!("invalid HTTP method '{phase_method}'"),
            })?;

        let mut builder = self
            .client
            .request(phase_method, &request.target)
            .timeout(request.timeout);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|error| classify_transport_error(error, &request.target, request.timeout))?;

        let status = response.status().as_u16();
        let outcome = evaluate_response(&request.origin, status, capture_headers(response.headers()));
        debug!(
            status,
            cors_header_present = outcome.cors_header_present,
            origin_authorized = outcome.origin_authorized,
            "response received"
        );

        Ok(outcome)
    }
}

impl Default for CorsProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a phase verdict from a captured response.
///
/// The origin counts as covered when the advertised value is exactly `*` or
/// contains the origin as a substring; the comparison is deliberately neither
/// an exact match nor an allow-list parse.
#[doc(hidden)]
pub fn evaluate_response(origin: &str, status: u16, headers: Headers) -> PhaseOutcome {
    let allowed_origin =
        headers::get_ignore_case(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN).map(str::to_owned);
    let origin_authorized = allowed_origin
        .as_deref()
        .is_some_and(|value| value == "*" || value.contains(origin));

    PhaseOutcome {
        status: Some(status),
        headers,
        cors_header_present: allowed_origin.is_some(),
        allowed_origin,
        origin_authorized,
    }
}

/// Flattens a response header map into an ordered name→value mapping,
/// comma-joining repeated names.
fn capture_headers(header_map: &HeaderMap) -> Headers {
    let mut headers = Headers::with_capacity(header_map.len());
    for (name, value) in header_map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match headers.entry(name.as_str().to_string()) {
            indexmap::map::Entry::Occupied(mut merged) => {
                let merged = merged.get_mut();
                merged.push_str(", ");
                merged.push_str(&value);
            }
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }

    headers
}

fn classify_transport_error(error: reqwest::Error, target: &str, limit: Duration) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout {
            target: target.to_string(),
            limit,
        }
    } else if error.is_connect() {
        ProbeError::Connection {
            target: target.to_string(),
            detail: root_cause(&error),
        }
    } else {
        ProbeError::Transport {
            detail: root_cause(&error),
        }
    }
}

fn root_cause(error: &reqwest::Error) -> String {
    let mut cause: &dyn std::error::Error = error;
    while let Some(source) = cause.source() {
        cause = source;
    }

    cause.to_string()
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod probe_test;
