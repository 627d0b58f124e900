//! Metrics and observability utilities
//!
//! Emits through the `metrics` facade with standardized naming; the
//! embedding service installs whatever exporter it wants.

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};

/// Metrics prefix for all ScholarNet metrics
pub const METRICS_PREFIX: &str = "scholarnet";

/// Histogram buckets for analysis latency (in seconds)
///
/// Project graphs are small; a full run past 10s usually means the caller
/// should have imposed a deadline.
pub const ANALYSIS_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    2.500, // 2.5s
    5.000, // 5s
    10.00, // 10s
    30.00, // 30s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_papers_ingested_total", METRICS_PREFIX),
        Unit::Count,
        "Total papers folded into coauthorship graphs"
    );

    describe_counter!(
        format!("{}_analyses_total", METRICS_PREFIX),
        Unit::Count,
        "Total completed network analysis runs"
    );

    describe_histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Network analysis latency in seconds"
    );

    describe_gauge!(
        format!("{}_graph_authors", METRICS_PREFIX),
        Unit::Count,
        "Authors in the most recently analyzed graph"
    );

    describe_gauge!(
        format!("{}_graph_collaborations", METRICS_PREFIX),
        Unit::Count,
        "Collaboration edges in the most recently analyzed graph"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record paper ingestion
pub fn record_papers_ingested(count: usize, project_id: &str) {
    counter!(
        format!("{}_papers_ingested_total", METRICS_PREFIX),
        "project" => project_id.to_string()
    )
    .increment(count as u64);
}

/// Helper to record a completed analysis run
pub fn record_analysis(duration_secs: f64, authors: usize, collaborations: usize, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_analyses_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);

    if success {
        histogram!(format!("{}_analysis_duration_seconds", METRICS_PREFIX)).record(duration_secs);

        gauge!(format!("{}_graph_authors", METRICS_PREFIX)).set(authors as f64);

        gauge!(format!("{}_graph_collaborations", METRICS_PREFIX)).set(collaborations as f64);
    }
}
