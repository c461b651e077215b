// * Operations: structured logging and Prometheus metrics

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init, init_tracing, init_tracing_pretty, metrics_content_type,
    record_fetch_duration, record_refinery_pass, record_request_failure, record_request_success,
    record_upstream_failure,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_metrics() {
        record_refinery_pass(1, 10, 0);
        record_request_success();

        let metrics = get_metrics_string();
        assert!(metrics.contains("lineup_records_emitted"));
        assert!(metrics.contains("lineup_requests_total"));
    }
}
