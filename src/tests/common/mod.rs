// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::config::settings::{
    LoggingConfig, MetricsConfig, ServerConfig, Settings, TokenConfig, UpstreamConfig,
};
use crate::generator::{GenerateCredential, GeneratedCredential, GenerationError};
use crate::helpers::clock::Clock;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn test_settings(port: u16) -> Settings {
    Settings {
        server: ServerConfig { host: "127.0.0.1".to_string(), port },
        token: TokenConfig::default(),
        upstream: UpstreamConfig { url: "http://127.0.0.1:1/unused".to_string() },
        metrics: MetricsConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// Clock driven by hand, so expiry tests never sleep.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(now_ms: i64) -> Arc<Self> {
        Arc::new(Self { now: AtomicI64::new(now_ms) })
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Generator that always succeeds with a distinct token per call.
pub struct CountingGenerator {
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl CountingGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { calls: Arc::new(AtomicUsize::new(0)), delay }
    }
}

impl GenerateCredential for CountingGenerator {
    async fn generate(&self) -> Result<GeneratedCredential, GenerationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        Ok(GeneratedCredential {
            visitor_data: format!("visitor-{}", n),
            po_token: format!("po-token-{}", n),
        })
    }
}

/// Generator that always fails.
pub struct FailingGenerator {
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl FailingGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { calls: Arc::new(AtomicUsize::new(0)), delay }
    }
}

impl GenerateCredential for FailingGenerator {
    async fn generate(&self) -> Result<GeneratedCredential, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Err(GenerationError::Upstream("botguard runtime unavailable".into()))
    }
}

/// Generator that replays a scripted sequence of outcomes.
pub struct ScriptedGenerator {
    pub calls: Arc<AtomicUsize>,
    outcomes: Mutex<VecDeque<Result<GeneratedCredential, GenerationError>>>,
}

impl ScriptedGenerator {
    pub fn new(outcomes: Vec<Result<GeneratedCredential, GenerationError>>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            outcomes: Mutex::new(outcomes.into()),
        }
    }

    pub fn ok(visitor_data: &str, po_token: &str) -> Result<GeneratedCredential, GenerationError> {
        Ok(GeneratedCredential {
            visitor_data: visitor_data.to_string(),
            po_token: po_token.to_string(),
        })
    }

    pub fn err(msg: &str) -> Result<GeneratedCredential, GenerationError> {
        Err(GenerationError::Upstream(msg.to_string()))
    }
}

impl GenerateCredential for ScriptedGenerator {
    async fn generate(&self) -> Result<GeneratedCredential, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| ScriptedGenerator::err("script exhausted"))
    }
}

/// Generator that never answers, for exercising the timeout bound.
pub struct StalledGenerator;

impl GenerateCredential for StalledGenerator {
    async fn generate(&self) -> Result<GeneratedCredential, GenerationError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(GenerationError::Upstream("unreachable".into()))
    }
}
