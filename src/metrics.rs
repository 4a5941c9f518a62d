//! Prometheus metrics for decisions and the HTTP surface.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::signals::engine::DecisionSource;

pub struct Metrics {
    registry: Registry,
    pub decisions_total: IntCounterVec,
    pub missing_signal_total: IntCounter,
    pub completion_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let decisions_total = IntCounterVec::new(
            Opts::new("decisions_total", "Portfolio decisions produced, by source"),
            &["source"],
        )?;
        let missing_signal_total = IntCounter::new(
            "missing_signal_total",
            "Decision requests rejected for a missing agent signal",
        )?;
        let completion_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "completion_duration_seconds",
            "Latency of the completion service call",
        ))?;
        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests handled")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            Gauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;

        registry.register(Box::new(decisions_total.clone()))?;
        registry.register(Box::new(missing_signal_total.clone()))?;
        registry.register(Box::new(completion_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            decisions_total,
            missing_signal_total,
            completion_duration_seconds,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
        })
    }

    pub fn record_decision(&self, source: DecisionSource) {
        self.decisions_total
            .with_label_values(&[source.as_str()])
            .inc();
    }

    /// Text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
