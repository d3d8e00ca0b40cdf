use tracing_subscriber::EnvFilter;

pub fn init() {
    // stdout carries MCP frames in stdio mode, so diagnostics always go to stderr.
    // Default to info level; allow override via RUST_LOG (e.g., "debug").
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Count one upstream call by outcome (`ok`, `status`, `transport`, `decode`).
pub fn record_upstream_call(outcome: &'static str, elapsed_ms: f64) {
    metrics::counter!("nature_vision_upstream_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("nature_vision_upstream_latency_ms").record(elapsed_ms);
    tracing::debug!(outcome, elapsed_ms, "metric");
}
