use crate::constants::method;
use crate::request::ProbeRequest;
use crate::result::{PhaseOutcome, ProbeResult};

/// Returns the one-line verdict for a probe result.
pub fn summary(result: &ProbeResult) -> &str {
    &result.message
}

/// Renders a deterministic multi-line trace of both phases: the probe
/// parameters, per-phase status and response headers, per-phase verdict, and
/// the final result or error line.
pub fn render_trace(request: &ProbeRequest, result: &ProbeResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Checking CORS from {} to {}",
        request.origin, request.target
    ));
    lines.push(format!("Method: {}", request.method));
    if let Some(names) = request.headers.request_names() {
        lines.push(format!("Request headers: {names}"));
    }

    lines.push(String::new());
    render_phase(
        &mut lines,
        format!("Preflight request ({})", method::OPTIONS),
        &request.origin,
        &result.preflight,
    );

    lines.push(String::new());
    render_phase(
        &mut lines,
        format!("Actual request ({})", request.method),
        &request.origin,
        &result.actual,
    );

    lines.push(String::new());
    match &result.error {
        Some(error) => lines.push(format!("Error: {error}")),
        None => lines.push(format!("Result: {}", result.message)),
    }

    lines.join("\n")
}

/// Serializes the full result as pretty-printed JSON.
pub fn to_json(result: &ProbeResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn render_phase(lines: &mut Vec<String>, heading: String, origin: &str, phase: &PhaseOutcome) {
    lines.push(heading);

    let Some(status) = phase.status else {
        lines.push("Not reached".into());
        return;
    };

    lines.push(format!("Status code: {status}"));
    lines.push("Response headers:".into());
    for (name, value) in &phase.headers {
        lines.push(format!("  {name}: {value}"));
    }

    if !phase.cors_header_present {
        lines.push("CORS headers are not present in the response".into());
    } else if phase.origin_authorized {
        lines.push(format!("CORS is enabled for {origin}"));
    } else {
        lines.push(format!("CORS is enabled but {origin} is not allowed"));
        if let Some(allowed) = &phase.allowed_origin {
            lines.push(format!("Allowed origins: {allowed}"));
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
