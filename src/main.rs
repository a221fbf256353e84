use clap::Parser;
use cors_probe::{
    CorsProbe, DEFAULT_TIMEOUT, HeaderSpec, ProbeRequest, render_trace, summary, to_json,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "cors-probe")]
#[command(about = "Check CORS configuration between domains", long_about = None)]
struct Cli {
    /// The origin domain (where the request is coming from)
    origin: String,

    /// The target domain (where the request is going to)
    target: String,

    /// HTTP method to use
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Additional header to include in the request, `name: value` or a bare name; repeatable
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Print the full two-phase trace
    #[arg(short, long)]
    verbose: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut request = ProbeRequest::new(cli.origin, cli.target);
    request.method = cli.method;
    request.headers = HeaderSpec::parse(&cli.headers);
    request.timeout = Duration::from_secs(cli.timeout);

    let probe = CorsProbe::new();
    let result = probe.check(&request).await;

    if cli.json {
        match to_json(&result) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("Error: {error}");
                return ExitCode::from(2);
            }
        }
    } else if cli.verbose {
        println!("{}", render_trace(&request, &result));
    } else {
        println!("{}", summary(&result));
    }

    if result.error.is_some() {
        ExitCode::from(2)
    } else if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
