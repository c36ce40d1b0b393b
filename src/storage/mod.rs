//! Grant storage abstraction.
//!
//! The [`GrantStore`] trait defines the persistence contract for
//! [`PermissionGrant`] records, keeping the evaluation layer free of any
//! storage concern. Implementations decide where grants live; the trait only
//! requires that the uniqueness invariant on
//! (tenant scope, permission name, provider name, provider key) is enforced
//! at insert time.
//!
//! Enforcing uniqueness in the store is load-bearing: the seeder's
//! check-then-insert sequence is not atomic across tasks, so two concurrent
//! seeders targeting the same key must collide inside the store, not above it.
//!
//! # Example Usage
//!
//! ```rust
//! use permission_server::storage::{GrantKey, GrantStore, InMemoryGrantStore};
//! use permission_server::grant::PermissionGrant;
//! use permission_server::tenant::TenantScope;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryGrantStore::new();
//!
//! let grant = PermissionGrant::new("orders.read", "role", "admin-group", TenantScope::Global);
//! let key = grant.key();
//! store.insert(grant).await?;
//!
//! let found = store.find(&key).await?;
//! assert!(found.is_some());
//!
//! let was_deleted = store.delete(&key).await?;
//! assert!(was_deleted);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::{InMemoryGrantStore, InMemoryGrantStoreStats};

use crate::grant::PermissionGrant;
use crate::tenant::TenantScope;
use std::fmt;
use std::future::Future;

/// The unique identity of a grant in storage.
///
/// Grants are organized as: tenant scope → permission name → provider name →
/// provider key. Tenant scope comes first so tenant isolation falls out of the
/// key structure rather than out of filtering discipline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantKey {
    tenant: TenantScope,
    permission_name: String,
    provider_name: String,
    provider_key: String,
}

impl GrantKey {
    /// Create a new grant key.
    pub fn new(
        tenant: TenantScope,
        permission_name: impl Into<String>,
        provider_name: impl Into<String>,
        provider_key: impl Into<String>,
    ) -> Self {
        Self {
            tenant,
            permission_name: permission_name.into(),
            provider_name: provider_name.into(),
            provider_key: provider_key.into(),
        }
    }

    /// The tenant scope.
    pub fn tenant(&self) -> &TenantScope {
        &self.tenant
    }

    /// The permission name.
    pub fn permission_name(&self) -> &str {
        &self.permission_name
    }

    /// The provider name.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// The provider key.
    pub fn provider_key(&self) -> &str {
        &self.provider_key
    }
}

impl fmt::Display for GrantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.tenant, self.permission_name, self.provider_name, self.provider_key
        )
    }
}

/// Core trait for grant persistence backends.
///
/// All operations are async and scoped by the [`GrantKey`]'s tenant. The
/// trait is deliberately small: find, insert, delete, plus the listing and
/// counting queries management surfaces need.
///
/// # Key Design Decisions
///
/// - **Insert rejects duplicates**: a second insert under an existing key must
///   fail with a duplicate-grant error rather than overwrite. Grants are
///   immutable; revocation is a delete, not an update.
/// - **Delete returns a boolean**: callers can distinguish revoking an
///   existing grant from deleting nothing without an extra lookup.
pub trait GrantStore: Send + Sync {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find a grant by its key.
    ///
    /// # Returns
    /// `Some(grant)` if a grant exists under the key, `None` otherwise.
    fn find(
        &self,
        key: &GrantKey,
    ) -> impl Future<Output = Result<Option<PermissionGrant>, Self::Error>> + Send;

    /// Insert a new grant.
    ///
    /// # Errors
    /// Fails with a duplicate-grant error if a grant already exists under the
    /// same (tenant, permission, provider name, provider key). The check and
    /// the insert must be atomic with respect to concurrent inserts.
    fn insert(
        &self,
        grant: PermissionGrant,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete a grant by its key.
    ///
    /// # Returns
    /// `true` if a grant was deleted, `false` if none existed.
    fn delete(&self, key: &GrantKey) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// List every grant held by a (provider name, provider key) pair within a
    /// tenant scope, ordered by permission name.
    fn list_for_provider(
        &self,
        tenant: &TenantScope,
        provider_name: &str,
        provider_key: &str,
    ) -> impl Future<Output = Result<Vec<PermissionGrant>, Self::Error>> + Send;

    /// Count the grants stored within a tenant scope.
    fn count(
        &self,
        tenant: &TenantScope,
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;
}
