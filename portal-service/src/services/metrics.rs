//! Prometheus metrics for portal-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

/// Recorder behind the `metrics` facade used by the shared HTTP middleware.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Counter for document lookups by outcome.
pub static DOCUMENTS_SERVED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "portal_documents_served_total",
        "Total number of service document lookups",
        &["channel", "status"]
    )
    .expect("Failed to register DOCUMENTS_SERVED")
});

/// Counter for PDF exports by outcome.
pub static PDFS_RENDERED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "portal_pdfs_rendered_total",
        "Total number of PDF certificate exports",
        &["status"]
    )
    .expect("Failed to register PDFS_RENDERED")
});

/// Histogram for renderer wall time.
pub static PDF_RENDER_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "portal_pdf_render_duration_seconds",
        "PDF render duration in seconds",
        &["status"],
        vec![0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to register PDF_RENDER_DURATION")
});

/// Histogram for database query duration.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "portal_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Counter for errors.
pub static ERRORS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "portal_errors_total",
        "Total number of errors",
        &["error_type"]
    )
    .expect("Failed to register ERRORS")
});

/// Initialize all metrics (forces lazy initialization) and install the
/// facade recorder once per process.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_none() {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                let _ = METRICS_HANDLE.set(handle);
            }
            Err(e) => tracing::warn!(error = %e, "Prometheus recorder already installed"),
        }
    }

    Lazy::force(&DOCUMENTS_SERVED);
    Lazy::force(&PDFS_RENDERED);
    Lazy::force(&PDF_RENDER_DURATION);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&ERRORS);
}

/// Get all metrics as Prometheus text format: the registry's own families
/// followed by the HTTP middleware's.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    let mut text = String::from_utf8_lossy(&buffer).into_owned();

    if let Some(handle) = METRICS_HANDLE.get() {
        text.push_str(&handle.render());
    }
    text
}

/// Record a document lookup, labelled by the route that asked for it.
pub fn record_document_served(channel: &str, status: &str) {
    DOCUMENTS_SERVED.with_label_values(&[channel, status]).inc();
}

pub fn record_pdf_rendered(status: &str, duration_secs: f64) {
    PDFS_RENDERED.with_label_values(&[status]).inc();
    PDF_RENDER_DURATION
        .with_label_values(&[status])
        .observe(duration_secs);
}

/// Record an error.
pub fn record_error(error_type: &str) {
    ERRORS.with_label_values(&[error_type]).inc();
}
