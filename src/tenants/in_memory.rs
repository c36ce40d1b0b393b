//! In-memory tenant store for testing and simple deployments.

use crate::storage::StorageError;
use crate::tenants::{Tenant, TenantStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory tenant store keyed by tenant id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTenantStore {
    data: Arc<RwLock<HashMap<String, Tenant>>>,
}

impl InMemoryTenantStore {
    /// Create a new empty in-memory tenant store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all tenants (useful for testing).
    pub async fn clear(&self) {
        let mut data = self.data.write().await;
        data.clear();
    }
}

impl TenantStore for InMemoryTenantStore {
    type Error = StorageError;

    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, Self::Error> {
        let data = self.data.read().await;
        Ok(data.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tenant>, Self::Error> {
        let data = self.data.read().await;
        Ok(data.values().find(|t| t.name() == name).cloned())
    }

    async fn save(&self, tenant: Tenant) -> Result<(), Self::Error> {
        let mut data = self.data.write().await;
        data.insert(tenant.id().to_string(), tenant);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, Self::Error> {
        let mut data = self.data.write().await;
        Ok(data.remove(id).is_some())
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Tenant>, Self::Error> {
        let data = self.data.read().await;
        let mut tenants: Vec<Tenant> = data.values().cloned().collect();
        tenants.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tenants.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<usize, Self::Error> {
        let data = self.data.read().await;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find() {
        let store = InMemoryTenantStore::new();
        let tenant = Tenant::new("acme");
        store.save(tenant.clone()).await.unwrap();

        let by_id = store.find_by_id(tenant.id()).await.unwrap().unwrap();
        assert_eq!(by_id.name(), "acme");

        let by_name = store.find_by_name("acme").await.unwrap().unwrap();
        assert_eq!(by_name.id(), tenant.id());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryTenantStore::new();
        let tenant = Tenant::new("acme");
        store.save(tenant.clone()).await.unwrap();

        assert!(store.delete(tenant.id()).await.unwrap());
        assert!(!store.delete(tenant.id()).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_ordered_with_paging() {
        let store = InMemoryTenantStore::new();
        for name in ["charlie", "alpha", "bravo"] {
            store.save(Tenant::new(name)).await.unwrap();
        }

        let page = store.list(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name(), "alpha");
        assert_eq!(page[1].name(), "bravo");

        let rest = store.list(2, 10).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name(), "charlie");
    }
}
