//! Tenant management.
//!
//! A small CRUD surface over the tenants whose ids appear in
//! [`crate::tenant::TenantScope::Tenant`]. The [`TenantStore`] trait keeps
//! persistence pluggable; [`TenantService`] layers the business rules on top:
//! generated ids, unique tenant names, and paged listing.
//!
//! # Example
//!
//! ```rust
//! use permission_server::tenants::{InMemoryTenantStore, TenantService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TenantService::new(InMemoryTenantStore::new());
//! let tenant = service.create("acme").await?;
//! assert_eq!(service.get(tenant.id()).await?.name(), "acme");
//! # Ok(())
//! # }
//! ```

pub mod in_memory;

pub use in_memory::InMemoryTenantStore;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::future::Future;
use uuid::Uuid;

/// A managed tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a tenant with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// The generated tenant id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name, unique across tenants.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the tenant was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Errors for tenant management operations.
#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    /// No tenant exists with the given id.
    #[error("Tenant not found: {id}")]
    NotFound { id: String },

    /// Another tenant already uses the requested name.
    #[error("Tenant name already in use: {name}")]
    DuplicateName { name: String },

    /// The tenant store failed.
    #[error("Tenant storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TenantError {
    fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    fn storage<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(error))
    }
}

pub type TenantResult<T> = Result<T, TenantError>;

/// Persistence contract for tenants.
///
/// Implementations store tenants by id; `list` must return a consistent
/// order (by name) so pagination is stable.
pub trait TenantStore: Send + Sync {
    /// The error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find a tenant by id.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Tenant>, Self::Error>> + Send;

    /// Find a tenant by name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Tenant>, Self::Error>> + Send;

    /// Insert or replace a tenant record.
    fn save(&self, tenant: Tenant) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete a tenant by id, returning whether it existed.
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// List tenants ordered by name, skipping `offset` and returning at most
    /// `limit`.
    fn list(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Tenant>, Self::Error>> + Send;

    /// Total number of tenants.
    fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send;
}

/// Tenant CRUD service over a pluggable store.
#[derive(Debug, Clone)]
pub struct TenantService<S: TenantStore> {
    store: S,
}

impl<S: TenantStore> TenantService<S> {
    /// Create a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a tenant with the given unique name.
    ///
    /// # Errors
    /// [`TenantError::DuplicateName`] if the name is already in use.
    pub async fn create(&self, name: impl Into<String>) -> TenantResult<Tenant> {
        let name = name.into();
        if self.find_by_name(&name).await?.is_some() {
            return Err(TenantError::duplicate_name(name));
        }

        let tenant = Tenant::new(name);
        self.store
            .save(tenant.clone())
            .await
            .map_err(TenantError::storage)?;
        info!("created tenant '{}' (id {})", tenant.name(), tenant.id());
        Ok(tenant)
    }

    /// Get a tenant by id.
    ///
    /// # Errors
    /// [`TenantError::NotFound`] if no tenant has the id.
    pub async fn get(&self, id: &str) -> TenantResult<Tenant> {
        self.store
            .find_by_id(id)
            .await
            .map_err(TenantError::storage)?
            .ok_or_else(|| TenantError::not_found(id))
    }

    /// Find a tenant by name.
    pub async fn find_by_name(&self, name: &str) -> TenantResult<Option<Tenant>> {
        self.store
            .find_by_name(name)
            .await
            .map_err(TenantError::storage)
    }

    /// Rename a tenant.
    ///
    /// # Errors
    /// [`TenantError::NotFound`] for an unknown id,
    /// [`TenantError::DuplicateName`] if another tenant holds the new name.
    pub async fn rename(&self, id: &str, new_name: impl Into<String>) -> TenantResult<Tenant> {
        let new_name = new_name.into();
        let mut tenant = self.get(id).await?;

        if let Some(existing) = self.find_by_name(&new_name).await? {
            if existing.id() != id {
                return Err(TenantError::duplicate_name(new_name));
            }
        }

        debug!("renaming tenant {} '{}' -> '{}'", id, tenant.name(), new_name);
        tenant.rename(new_name);
        self.store
            .save(tenant.clone())
            .await
            .map_err(TenantError::storage)?;
        Ok(tenant)
    }

    /// Delete a tenant by id.
    ///
    /// # Errors
    /// [`TenantError::NotFound`] if no tenant has the id.
    pub async fn delete(&self, id: &str) -> TenantResult<()> {
        let existed = self.store.delete(id).await.map_err(TenantError::storage)?;
        if !existed {
            return Err(TenantError::not_found(id));
        }
        info!("deleted tenant {}", id);
        Ok(())
    }

    /// List tenants ordered by name with offset/limit pagination.
    pub async fn list(&self, offset: usize, limit: usize) -> TenantResult<Vec<Tenant>> {
        self.store
            .list(offset, limit)
            .await
            .map_err(TenantError::storage)
    }

    /// Total number of tenants.
    pub async fn count(&self) -> TenantResult<usize> {
        self.store.count().await.map_err(TenantError::storage)
    }
}
