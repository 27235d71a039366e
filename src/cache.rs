use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use crate::auth::AuthEvent;
use crate::constants::MAX_CACHED_OWNERS;
use crate::debts::DebtStore;
use crate::error::DebtError;
use crate::models::Debt;

struct CachedList {
    debts: Vec<Debt>,
    load_seq: u64,
}

/// Local mirror of each owner's debt list, newest first.
///
/// An owner's entry is only present once it has been loaded from the store.
/// Successful creates and deletes patch a loaded entry in place; nothing is
/// patched for an owner whose list was never loaded, so the next load picks
/// the change up from the store instead.
///
/// At most `capacity` owners are kept; loading one more evicts the entry
/// that was loaded longest ago.
#[derive(Clone)]
pub struct DebtCache {
    lists: Arc<RwLock<HashMap<String, CachedList>>>,
    loads: Arc<AtomicU64>,
    capacity: usize,
}

impl Default for DebtCache {
    fn default() -> Self {
        Self::with_capacity(MAX_CACHED_OWNERS)
    }
}

impl DebtCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lists: Arc::new(RwLock::new(HashMap::new())),
            loads: Arc::new(AtomicU64::new(0)),
            capacity: capacity.max(1),
        }
    }

    pub async fn get(&self, owner_id: &str) -> Option<Vec<Debt>> {
        self.lists
            .read()
            .await
            .get(owner_id)
            .map(|cached| cached.debts.clone())
    }

    /// Returns the cached list, loading it from the store on a miss.
    ///
    /// The write lock is held across the store read so a concurrent
    /// `prepend`/`remove` lands either before the load (and is seen by the
    /// query) or after it (and patches the loaded entry).
    pub async fn get_or_load(
        &self,
        store: &DebtStore,
        owner_id: &str,
    ) -> Result<Vec<Debt>, DebtError> {
        if let Some(debts) = self.get(owner_id).await {
            return Ok(debts);
        }

        let mut lists = self.lists.write().await;
        if let Some(cached) = lists.get(owner_id) {
            return Ok(cached.debts.clone());
        }

        debug!(owner_id = %owner_id, "debt list cache miss");
        let debts = store.list_by_owner(owner_id).await?;

        if lists.len() >= self.capacity {
            let oldest = lists
                .iter()
                .min_by_key(|(_, cached)| cached.load_seq)
                .map(|(owner, _)| owner.clone());
            if let Some(oldest) = oldest {
                debug!(owner_id = %oldest, "evicting cached debt list");
                lists.remove(&oldest);
            }
        }

        lists.insert(
            owner_id.to_string(),
            CachedList {
                debts: debts.clone(),
                load_seq: self.loads.fetch_add(1, Ordering::Relaxed),
            },
        );
        Ok(debts)
    }

    /// No-op when the owner's list is not loaded or already holds the debt.
    pub async fn prepend(&self, owner_id: &str, debt: Debt) {
        if let Some(cached) = self.lists.write().await.get_mut(owner_id) {
            if !cached.debts.iter().any(|d| d.id == debt.id) {
                cached.debts.insert(0, debt);
            }
        }
    }

    pub async fn remove(&self, owner_id: &str, debt_id: &str) {
        if let Some(cached) = self.lists.write().await.get_mut(owner_id) {
            cached.debts.retain(|d| d.id != debt_id);
        }
    }

    pub async fn invalidate(&self, owner_id: &str) {
        self.lists.write().await.remove(owner_id);
    }

    pub async fn is_loaded(&self, owner_id: &str) -> bool {
        self.lists.read().await.contains_key(owner_id)
    }

    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lists.read().await.is_empty()
    }
}

/// Drops an owner's cached list when they sign out.
pub fn spawn_invalidation(
    cache: DebtCache,
    mut events: broadcast::Receiver<AuthEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(AuthEvent::SignedOut { user_id }) => cache.invalidate(&user_id).await,
                Ok(AuthEvent::SignedIn { .. }) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "auth events lagged, clearing debt cache");
                    cache.lists.write().await.clear();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
