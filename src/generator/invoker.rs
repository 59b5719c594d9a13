use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::credential::Credential;
use crate::cache::store::CredentialStore;
use crate::generator::{GenerateCredential, GenerationError};
use crate::helpers::clock::Clock;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;

type RoundOutcome = Result<Credential, GenerationError>;

/// Single-flight credential generation.
///
/// At most one call to the generation primitive is outstanding at any
/// instant. Callers arriving while a round is in flight subscribe to its
/// outcome instead of starting their own. The round runs on a spawned task,
/// so a caller dropped mid-wait (client disconnect) cannot strand the round
/// or its other waiters.
pub struct Invoker<G> {
    inner: Arc<Inner<G>>,
}

struct Inner<G> {
    generator: G,
    store: CredentialStore,
    clock: Arc<dyn Clock>,
    lifetime: Duration,
    generation_timeout: Duration,
    /// `Some` exactly while a round is in flight.
    inflight: Mutex<Option<broadcast::Sender<RoundOutcome>>>,
}

impl<G> Clone for Invoker<G> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<G> Invoker<G>
where
    G: GenerateCredential + Send + Sync + 'static,
{
    pub fn new(
        generator: G,
        store: CredentialStore,
        clock: Arc<dyn Clock>,
        lifetime: Duration,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                generator,
                store,
                clock,
                lifetime,
                generation_timeout,
                inflight: Mutex::new(None),
            }),
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.inner.store
    }

    /// Return the cached credential if still valid, otherwise run (or join)
    /// one generation round.
    pub async fn ensure_fresh(&self) -> RoundOutcome {
        let metrics = get_metrics().await;

        // Fast path: valid cached record.
        if let Some(credential) = self.inner.store.get().await {
            if credential.is_valid(self.inner.clock.now_ms()) {
                metrics.cache_hits.inc();
                return Ok(credential);
            }
        }

        let mut rx = {
            let mut inflight = self.inner.inflight.lock().await;
            match inflight.as_ref() {
                Some(tx) => tx.subscribe(),
                None => {
                    // Re-check under the lock: a round that finished while we
                    // waited may have installed a fresh record.
                    if let Some(credential) = self.inner.store.get().await {
                        if credential.is_valid(self.inner.clock.now_ms()) {
                            metrics.cache_hits.inc();
                            return Ok(credential);
                        }
                    }

                    let (tx, rx) = broadcast::channel(1);
                    *inflight = Some(tx.clone());

                    let inner = self.inner.clone();
                    tokio::spawn(async move {
                        let outcome = run_round(&inner).await;
                        *inner.inflight.lock().await = None;
                        // No receivers left is fine: every waiter gave up.
                        let _ = tx.send(outcome);
                    });
                    rx
                }
            }
        };

        rx.recv().await.unwrap_or_else(|_| {
            Err(GenerationError::Upstream(
                "generation round ended without a result".into(),
            ))
        })
    }
}

/// One generation round: invoke the primitive under a timeout and install
/// the result. On failure the store is left exactly as it was — an expired
/// record is never resurrected.
async fn run_round<G>(inner: &Inner<G>) -> RoundOutcome
where
    G: GenerateCredential,
{
    let metrics = get_metrics().await;
    let start = get_instant();
    metrics.generation_rounds.inc();
    info!("generating new PO token");

    let generated =
        match tokio::time::timeout(inner.generation_timeout, inner.generator.generate()).await {
            Ok(Ok(generated)) => generated,
            Ok(Err(err)) => {
                metrics.generation_failures.with_label_values(&["upstream"]).inc();
                metrics.generation_duration.observe(start.elapsed().as_secs_f64());
                warn!("PO token generation failed: {}", err);
                return Err(err);
            }
            Err(_) => {
                let after_secs = inner.generation_timeout.as_secs();
                metrics.generation_failures.with_label_values(&["timeout"]).inc();
                metrics.generation_duration.observe(start.elapsed().as_secs_f64());
                warn!("PO token generation timed out after {}s", after_secs);
                return Err(GenerationError::Timeout { after_secs });
            }
        };

    let now_ms = inner.clock.now_ms();
    let credential = Credential::new(
        generated.visitor_data,
        generated.po_token,
        now_ms + inner.lifetime.as_millis() as i64,
    );
    inner.store.replace(credential.clone()).await;

    metrics.generation_duration.observe(start.elapsed().as_secs_f64());
    metrics.token_expiry_unix.set(credential.expires_at / 1000);
    info!(
        "PO token generated, visitor data '{}...', expires at {}",
        credential.visitor_data.chars().take(20).collect::<String>(),
        credential.expires_at
    );
    Ok(credential)
}
