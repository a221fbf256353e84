use cors_probe::{CorsProbe, HeaderSpec, ProbeRequest, render_trace};

#[tokio::main]
async fn main() {
    let mut request = ProbeRequest::new("https://localhost:3000", "https://api.github.com");
    request.headers = HeaderSpec::parse(["X-Requested-With: fetch"]);

    let probe = CorsProbe::new();
    let result = probe.check(&request).await;

    println!("{}", render_trace(&request, &result));
}
