//! Pluggable grant providers.
//!
//! A [`PermissionProvider`] is a grant source the manager consults: role-based
//! grants, direct user grants, client grants, and so on. Providers are trait
//! objects so the manager can hold an ordered, heterogeneous list of them;
//! the order they are registered in is the order they are queried in.
//!
//! [`GrantProvider`] is the standard store-backed implementation. The
//! role-based and direct-user providers of a typical deployment are just two
//! instances of it with different names sharing one store:
//!
//! ```rust
//! use permission_server::provider::GrantProvider;
//! use permission_server::storage::InMemoryGrantStore;
//!
//! let store = InMemoryGrantStore::new();
//! let roles = GrantProvider::role(store.clone());
//! let users = GrantProvider::user(store);
//! ```

use crate::error::{PermissionError, PermissionResult};
use crate::grant::{GrantCheck, PermissionGrant};
use crate::storage::{GrantKey, GrantStore};
use crate::tenant::TenantScope;
use async_trait::async_trait;
use log::debug;

/// Provider name used by [`GrantProvider::role`].
pub const ROLE_PROVIDER_NAME: &str = "role";

/// Provider name used by [`GrantProvider::user`].
pub const USER_PROVIDER_NAME: &str = "user";

/// A pluggable grant source.
///
/// Implementations must be cheap to query: the manager calls `check` on every
/// configured provider for every non-short-circuited permission lookup.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// The provider's unique name (its identity in definitions and grants).
    fn name(&self) -> &str;

    /// Check whether this provider grants `permission_name` for the queried
    /// (`provider_name`, `provider_key`) pair within `tenant`.
    ///
    /// `provider_name` is the name the caller is asking about, which may not
    /// be this provider's own name; providers are free to answer ungranted in
    /// that case or to derive an answer (e.g. a role provider resolving a
    /// user's roles).
    ///
    /// # Errors
    /// Any failure must be returned, never mapped to an ungranted result.
    async fn check(
        &self,
        permission_name: &str,
        provider_name: &str,
        provider_key: &str,
        tenant: &TenantScope,
    ) -> PermissionResult<GrantCheck>;

    /// Grant or revoke `permission_name` for `provider_key` within `tenant`.
    async fn set(
        &self,
        permission_name: &str,
        provider_key: &str,
        is_granted: bool,
        tenant: &TenantScope,
    ) -> PermissionResult<()>;
}

/// Standard store-backed provider.
///
/// Answers checks from the grant store under its own provider name. A check
/// that asks about a different provider name returns ungranted without
/// touching the store.
#[derive(Debug, Clone)]
pub struct GrantProvider<S: GrantStore> {
    name: String,
    store: S,
}

impl<S: GrantStore> GrantProvider<S> {
    /// Create a provider with the given name over the given store.
    pub fn new(name: impl Into<String>, store: S) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    /// Role-based provider: grants keyed by role name.
    pub fn role(store: S) -> Self {
        Self::new(ROLE_PROVIDER_NAME, store)
    }

    /// Direct-user provider: grants keyed by user id.
    pub fn user(store: S) -> Self {
        Self::new(USER_PROVIDER_NAME, store)
    }

    fn grant_key(&self, permission_name: &str, provider_key: &str, tenant: &TenantScope) -> GrantKey {
        GrantKey::new(tenant.clone(), permission_name, &self.name, provider_key)
    }
}

#[async_trait]
impl<S: GrantStore> PermissionProvider for GrantProvider<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(
        &self,
        permission_name: &str,
        provider_name: &str,
        provider_key: &str,
        tenant: &TenantScope,
    ) -> PermissionResult<GrantCheck> {
        if provider_name != self.name {
            return Ok(GrantCheck::ungranted());
        }

        let key = self.grant_key(permission_name, provider_key, tenant);
        let found = self
            .store
            .find(&key)
            .await
            .map_err(PermissionError::provider_error)?;

        Ok(match found {
            Some(grant) => GrantCheck::granted(grant.provider_key()),
            None => GrantCheck::ungranted(),
        })
    }

    async fn set(
        &self,
        permission_name: &str,
        provider_key: &str,
        is_granted: bool,
        tenant: &TenantScope,
    ) -> PermissionResult<()> {
        if is_granted {
            let grant =
                PermissionGrant::new(permission_name, &self.name, provider_key, tenant.clone());
            debug!(
                "provider '{}' granting '{}' to '{}' in {}",
                self.name, permission_name, provider_key, tenant
            );
            self.store
                .insert(grant)
                .await
                .map_err(PermissionError::provider_error)
        } else {
            let key = self.grant_key(permission_name, provider_key, tenant);
            debug!("provider '{}' revoking {}", self.name, key);
            self.store
                .delete(&key)
                .await
                .map_err(PermissionError::provider_error)?;
            Ok(())
        }
    }
}
