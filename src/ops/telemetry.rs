// * Telemetry - JSON Logging and Prometheus Metrics
// * Structured logs go to stderr so `dump` output stays clean.
// * Metrics are exposed on the service's /metrics route.

use crate::config::LogFormat;
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_gauge, register_histogram, register_int_counter,
    CounterVec, Encoder, Gauge, Histogram, IntCounter, TextEncoder,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    // * Request counter by outcome
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "lineup_requests_total",
        "Total number of /ships requests by status",
        &["status"]
    ).unwrap();

    // * Upstream fetch duration (request sent until body consumed)
    pub static ref FETCH_DURATION_SECONDS: Histogram = register_histogram!(
        "lineup_fetch_duration_seconds",
        "Upstream fetch and extraction duration in seconds",
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    ).unwrap();

    // * Tables found in upstream documents
    pub static ref TABLES_SEEN_TOTAL: IntCounter = register_int_counter!(
        "lineup_tables_seen_total",
        "Total number of tables extracted from upstream documents"
    ).unwrap();

    // * Records in the most recent response
    pub static ref RECORDS_EMITTED: Gauge = register_gauge!(
        "lineup_records_emitted",
        "Number of ship records produced by the last refinery pass"
    ).unwrap();

    // * Rows discarded by the filled-cell filter
    pub static ref ROWS_DROPPED_TOTAL: IntCounter = register_int_counter!(
        "lineup_rows_dropped_total",
        "Total number of rows dropped as non-data rows"
    ).unwrap();

    // * Upstream failures by kind
    pub static ref UPSTREAM_FAILURES_TOTAL: CounterVec = register_counter_vec!(
        "lineup_upstream_failures_total",
        "Total upstream failures by kind",
        &["kind"]
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use ship_lineup::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(url = "https://example.com", "Fetching lineup");
/// ```
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing in the configured format
pub fn init(format: LogFormat) {
    match format {
        LogFormat::Json => init_tracing(),
        LogFormat::Pretty => init_tracing_pretty(),
    }
}

/// Returns the current metrics in the Prometheus text format
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Content type for the metrics endpoint
pub fn metrics_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}

/// Records a served /ships request
pub fn record_request_success() {
    REQUESTS_TOTAL.with_label_values(&["success"]).inc();
}

/// Records a /ships request that failed upstream
pub fn record_request_failure() {
    REQUESTS_TOTAL.with_label_values(&["failure"]).inc();
}

/// Records the duration of one upstream fetch
pub fn record_fetch_duration(seconds: f64) {
    FETCH_DURATION_SECONDS.observe(seconds);
}

/// Records the outcome of one refinery pass
pub fn record_refinery_pass(tables: usize, records: usize, rows_dropped: usize) {
    TABLES_SEEN_TOTAL.inc_by(tables as u64);
    RECORDS_EMITTED.set(records as f64);
    ROWS_DROPPED_TOTAL.inc_by(rows_dropped as u64);
}

/// Records an upstream failure by kind
pub fn record_upstream_failure(kind: &str) {
    UPSTREAM_FAILURES_TOTAL.with_label_values(&[kind]).inc();
}
