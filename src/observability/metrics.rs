use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Front end metrics
    pub token_requests: IntCounterVec,

    // Cache metrics
    pub cache_hits: IntCounter,
    pub token_expiry_unix: IntGauge,

    // Generation metrics
    pub generation_rounds: IntCounter,
    pub generation_failures: IntCounterVec,
    pub generation_duration: Histogram,

    // Runtime
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("potoken".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            token_requests: IntCounterVec::new(Opts::new("token_requests_total", "Token retrieval requests by outcome"), &["outcome"]).unwrap(),

            cache_hits: IntCounter::new("cache_hits_total", "Requests answered from a valid cached credential").unwrap(),
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Expiry timestamp of the cached credential").unwrap(),

            generation_rounds: IntCounter::new("generation_rounds_total", "Generation rounds started").unwrap(),
            generation_failures: IntCounterVec::new(Opts::new("generation_failures_total", "Generation failures by reason"), &["reason"]).unwrap(),
            generation_duration: Histogram::with_opts(HistogramOpts::new("generation_duration_seconds", "Generation round duration seconds").buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0])).unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_requests.clone())).unwrap();
        reg.register(Box::new(metrics.cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.generation_rounds.clone())).unwrap();
        reg.register(Box::new(metrics.generation_failures.clone())).unwrap();
        reg.register(Box::new(metrics.generation_duration.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
