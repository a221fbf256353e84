use axum::Router;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";

/// Serves the router on an ephemeral local port and returns the base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });

    format!("http://{addr}")
}

/// Answers every request on `/data` with the given allow-origin value.
pub fn allowing(value: &'static str) -> Router {
    Router::new().route(
        "/data",
        any(move || async move { (StatusCode::NO_CONTENT, [(ALLOW_ORIGIN, value)]) }),
    )
}

/// Answers OPTIONS with one allow-origin value and every other method with
/// another; `None` omits the header and replies 200.
pub fn split(preflight: Option<&'static str>, actual: Option<&'static str>) -> Router {
    Router::new().route(
        "/data",
        any(move |method: Method| async move {
            let value = if method == Method::OPTIONS {
                preflight
            } else {
                actual
            };
            match value {
                Some(allow) => {
                    (StatusCode::NO_CONTENT, [(ALLOW_ORIGIN, allow)]).into_response()
                }
                None => StatusCode::OK.into_response(),
            }
        }),
    )
}

/// Counts hits without advertising CORS, so callers can assert how many
/// requests actually went out.
pub fn counting() -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let seen = hits.clone();
    let app = Router::new().route(
        "/data",
        any(move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                StatusCode::OK
            }
        }),
    );

    (app, hits)
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub headers: Vec<(String, String)>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Records every request's method and headers, replying with a wildcard
/// allow-origin so both phases complete.
pub fn recording() -> (Router, Arc<Mutex<Vec<Recorded>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let seen = log.clone();
    let app = Router::new().route(
        "/data",
        any(move |method: Method, headers: HeaderMap| {
            let seen = seen.clone();
            async move {
                let recorded = Recorded {
                    method: method.to_string(),
                    headers: headers
                        .iter()
                        .map(|(name, value)| {
                            (
                                name.as_str().to_string(),
                                String::from_utf8_lossy(value.as_bytes()).into_owned(),
                            )
                        })
                        .collect(),
                };
                seen.lock().expect("record request").push(recorded);
                (StatusCode::NO_CONTENT, [(ALLOW_ORIGIN, "*")])
            }
        }),
    );

    (app, log)
}

/// Replies to OPTIONS immediately and stalls every other method past the
/// given delay.
pub fn slow_actual(delay: Duration) -> Router {
    Router::new().route(
        "/data",
        any(move |method: Method| async move {
            if method == Method::OPTIONS {
                (StatusCode::NO_CONTENT, [(ALLOW_ORIGIN, "*")]).into_response()
            } else {
                tokio::time::sleep(delay).await;
                (StatusCode::OK, [(ALLOW_ORIGIN, "*")]).into_response()
            }
        }),
    )
}
