//! In-memory grant store.
//!
//! Thread-safe [`GrantStore`] implementation over a HashMap guarded by an
//! async RwLock. Designed for testing, development, and embedded deployments
//! where persistence is not required.
//!
//! The uniqueness invariant on (tenant, permission, provider name, provider
//! key) is enforced under the write lock, so concurrent inserts of the same
//! key resolve to exactly one success and one duplicate error.
//!
//! # Performance Characteristics
//!
//! * FIND/INSERT/DELETE: O(1) average case
//! * LIST/COUNT: O(n) over stored grants

use crate::grant::PermissionGrant;
use crate::storage::{GrantKey, GrantStore, StorageError};
use crate::tenant::TenantScope;
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory grant store.
///
/// Cloning is cheap and clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGrantStore {
    data: Arc<RwLock<HashMap<GrantKey, PermissionGrant>>>,
}

/// Counters describing the current store contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryGrantStoreStats {
    /// Distinct tenant scopes (the global scope counts as one).
    pub scope_count: usize,
    /// Total grants across all scopes.
    pub total_grants: usize,
}

impl InMemoryGrantStore {
    /// Create a new empty in-memory grant store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get store statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryGrantStoreStats {
        let data = self.data.read().await;
        let mut scopes = std::collections::HashSet::new();
        for key in data.keys() {
            scopes.insert(key.tenant().clone());
        }
        InMemoryGrantStoreStats {
            scope_count: scopes.len(),
            total_grants: data.len(),
        }
    }

    /// Clear all grants (useful for testing).
    pub async fn clear(&self) {
        let mut data = self.data.write().await;
        data.clear();
    }
}

impl GrantStore for InMemoryGrantStore {
    type Error = StorageError;

    async fn find(&self, key: &GrantKey) -> Result<Option<PermissionGrant>, Self::Error> {
        let data = self.data.read().await;
        trace!("find grant {}", key);
        Ok(data.get(key).cloned())
    }

    async fn insert(&self, grant: PermissionGrant) -> Result<(), Self::Error> {
        let key = grant.key();
        // Check-and-insert under one write lock so duplicates cannot slip in
        // between the two steps.
        let mut data = self.data.write().await;
        if data.contains_key(&key) {
            debug!("rejected duplicate grant {}", key);
            return Err(StorageError::duplicate_grant(&key));
        }
        debug!("inserted grant {} (id {})", key, grant.id());
        data.insert(key, grant);
        Ok(())
    }

    async fn delete(&self, key: &GrantKey) -> Result<bool, Self::Error> {
        let mut data = self.data.write().await;
        let removed = data.remove(key).is_some();
        debug!("delete grant {}: existed={}", key, removed);
        Ok(removed)
    }

    async fn list_for_provider(
        &self,
        tenant: &TenantScope,
        provider_name: &str,
        provider_key: &str,
    ) -> Result<Vec<PermissionGrant>, Self::Error> {
        let data = self.data.read().await;
        let mut grants: Vec<PermissionGrant> = data
            .values()
            .filter(|g| {
                g.tenant() == tenant
                    && g.provider_name() == provider_name
                    && g.provider_key() == provider_key
            })
            .cloned()
            .collect();
        grants.sort_by(|a, b| a.permission_name().cmp(b.permission_name()));
        Ok(grants)
    }

    async fn count(&self, tenant: &TenantScope) -> Result<usize, Self::Error> {
        let data = self.data.read().await;
        Ok(data.keys().filter(|k| k.tenant() == tenant).count())
    }
}
