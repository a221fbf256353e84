pub mod constants;
mod headers;
mod probe;
mod report;
mod request;
mod result;
mod tool;
mod util;
mod validate;

pub use headers::{HeaderSpec, Headers, get_ignore_case};
pub use probe::CorsProbe;
pub use report::{render_trace, summary, to_json};
pub use request::{DEFAULT_TIMEOUT, ProbeRequest};
pub use result::{PhaseOutcome, ProbeError, ProbeResult};
pub use tool::{ToolRequest, check_cors};
pub use validate::is_absolute_url;

#[doc(hidden)]
pub use probe::evaluate_response;
