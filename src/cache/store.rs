use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::credential::Credential;

/// Holder for the single cached credential of this process.
///
/// Cheap to clone; all clones share the same slot. The store never filters
/// on expiry — validity is the caller's question, answered against an
/// injected clock (see `Credential::is_valid`).
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(None)) }
    }

    /// Get the current record, valid or not.
    pub async fn get(&self) -> Option<Credential> {
        self.inner.read().await.clone()
    }

    /// Atomically install a new record, discarding the previous one.
    pub async fn replace(&self, credential: Credential) {
        let mut slot = self.inner.write().await;
        *slot = Some(credential);
    }
}
