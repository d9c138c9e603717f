//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_vec_with_registry, register_histogram_with_registry, Counter, CounterVec,
    Histogram, HistogramVec, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Oracle metrics
    pub oracle_requests: CounterVec,
    pub oracle_request_duration: HistogramVec,
    pub oracle_circuit_open: CounterVec,

    // Discovery pipeline metrics
    pub discovery_requests: CounterVec,
    pub discovery_records_dropped: Counter,
    pub discovery_items_returned: Histogram,
    pub discovery_duration: Histogram,
    pub discovery_stale_results: Counter,
    pub brief_fallbacks: Counter,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let oracle_requests = register_counter_vec_with_registry!(
            Opts::new("oracle_requests_total", "Total oracle requests"),
            &["operation", "status"],
            registry
        )?;

        let oracle_request_duration = register_histogram_vec_with_registry!(
            "oracle_request_duration_seconds",
            "Oracle request duration in seconds",
            &["operation"],
            registry
        )?;

        let oracle_circuit_open = register_counter_vec_with_registry!(
            Opts::new("oracle_circuit_open_total", "Calls rejected by an open circuit"),
            &["operation"],
            registry
        )?;

        let discovery_requests = register_counter_vec_with_registry!(
            Opts::new("discovery_requests_total", "Total discovery searches"),
            &["outcome"],
            registry
        )?;

        let discovery_records_dropped = register_counter_with_registry!(
            Opts::new(
                "discovery_records_dropped_total",
                "Oracle records dropped during validation"
            ),
            registry
        )?;

        let discovery_items_returned = register_histogram_with_registry!(
            "discovery_items_returned",
            "Items returned per discovery search",
            vec![0.0, 1.0, 2.0, 5.0, 8.0, 10.0],
            registry
        )?;

        let discovery_duration = register_histogram_with_registry!(
            "discovery_duration_seconds",
            "End-to-end discovery search duration in seconds",
            registry
        )?;

        let discovery_stale_results = register_counter_with_registry!(
            Opts::new(
                "discovery_stale_results_total",
                "Superseded discovery results discarded by a session"
            ),
            registry
        )?;

        let brief_fallbacks = register_counter_with_registry!(
            Opts::new("brief_fallbacks_total", "Briefs answered with the sentinel text"),
            registry
        )?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            oracle_requests,
            oracle_request_duration,
            oracle_circuit_open,
            discovery_requests,
            discovery_records_dropped,
            discovery_items_returned,
            discovery_duration,
            discovery_stale_results,
            brief_fallbacks,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_oracle_request(&self, operation: &str, status: &str) {
        self.oracle_requests
            .with_label_values(&[operation, status])
            .inc();
    }

    /// Record the outcome of one discovery search
    pub fn record_discovery(&self, returned: usize, dropped: usize) {
        let outcome = if returned == 0 { "empty" } else { "items" };
        self.discovery_requests.with_label_values(&[outcome]).inc();
        self.discovery_items_returned.observe(returned as f64);
        if dropped > 0 {
            self.discovery_records_dropped.inc_by(dropped as f64);
        }
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
