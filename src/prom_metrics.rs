//! # Prometheus Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `portfolio_http_request_duration_seconds` | Histogram | `method`, `path` | Request latency |
//! | `portfolio_contact_submissions_total` | Counter | `outcome` | Contact form results |
//!
//! `/metrics` renders the registry on each scrape. Paths are normalized before
//! labelling so per-project URLs collapse into one series.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct HttpLabel {
    pub method: String,
    pub path: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct OutcomeLabel {
    pub outcome: String,
}

type HistogramFamily = Family<HttpLabel, Histogram, fn() -> Histogram>;

fn new_latency_histogram() -> Histogram {
    // 5ms .. ~10s
    Histogram::new(exponential_buckets(0.005, 2.0, 12))
}

/// Thread-safe metrics registry for the portfolio server.
pub struct Metrics {
    pub registry: Registry,
    pub http_request_duration: HistogramFamily,
    pub contact_submissions: Family<OutcomeLabel, Counter>,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_request_duration: HistogramFamily =
            Family::new_with_constructor(new_latency_histogram);
        registry.register(
            "portfolio_http_request_duration_seconds",
            "HTTP request latency by method and normalized path",
            http_request_duration.clone(),
        );

        let contact_submissions = Family::<OutcomeLabel, Counter>::default();
        registry.register(
            "portfolio_contact_submissions",
            "Contact form submissions by outcome",
            contact_submissions.clone(),
        );

        Self {
            registry,
            http_request_duration,
            contact_submissions,
        }
    }

    pub fn record_contact(&self, outcome: &str) {
        self.contact_submissions
            .get_or_create(&OutcomeLabel {
                outcome: outcome.to_string(),
            })
            .inc();
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        encode(&mut buf, &self.registry).expect("encoding metrics should not fail");
        buf
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
