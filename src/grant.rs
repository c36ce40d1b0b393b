//! Grant records and per-query aggregation results.
//!
//! [`PermissionGrant`] is the stored record asserting that a provider granted
//! a permission to a specific key within a tenant scope. It is immutable after
//! creation; the only lifecycle is insert (seeder or provider `set`) and
//! delete (provider `set` to revoked).
//!
//! [`PermissionWithGrantedProviders`] is the aggregate a
//! [`crate::manager::PermissionManager`] query produces: whether the
//! permission is granted and, in provider configuration order, every provider
//! that granted it. It is constructed fresh per query and never persisted.

use crate::storage::GrantKey;
use crate::tenant::TenantScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored permission grant.
///
/// Uniqueness is enforced by the store on
/// (tenant scope, permission name, provider name, provider key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    id: String,
    permission_name: String,
    provider_name: String,
    provider_key: String,
    tenant: TenantScope,
    created_at: DateTime<Utc>,
}

impl PermissionGrant {
    /// Create a new grant with a freshly generated unique id.
    pub fn new(
        permission_name: impl Into<String>,
        provider_name: impl Into<String>,
        provider_key: impl Into<String>,
        tenant: TenantScope,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            permission_name: permission_name.into(),
            provider_name: provider_name.into(),
            provider_key: provider_key.into(),
            tenant,
            created_at: Utc::now(),
        }
    }

    /// The generated grant id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The granted permission name.
    pub fn permission_name(&self) -> &str {
        &self.permission_name
    }

    /// The provider that issued the grant.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// The key the grant was issued to (role name, user id, ...).
    pub fn provider_key(&self) -> &str {
        &self.provider_key
    }

    /// The tenant scope the grant lives in.
    pub fn tenant(&self) -> &TenantScope {
        &self.tenant
    }

    /// When the grant was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The storage key identifying this grant.
    pub fn key(&self) -> GrantKey {
        GrantKey::new(
            self.tenant.clone(),
            &self.permission_name,
            &self.provider_name,
            &self.provider_key,
        )
    }
}

/// The outcome of a single provider check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantCheck {
    /// Whether the provider reports the permission as granted.
    pub is_granted: bool,
    /// The key the grant was found under, when granted.
    pub provider_key: Option<String>,
}

impl GrantCheck {
    /// A granted check result for the given key.
    pub fn granted(provider_key: impl Into<String>) -> Self {
        Self {
            is_granted: true,
            provider_key: Some(provider_key.into()),
        }
    }

    /// An ungranted check result.
    pub fn ungranted() -> Self {
        Self {
            is_granted: false,
            provider_key: None,
        }
    }
}

/// A (provider name, provider key) pair that granted a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantingProvider {
    pub provider_name: String,
    pub provider_key: String,
}

/// Aggregate result of a permission query across all configured providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionWithGrantedProviders {
    name: String,
    is_granted: bool,
    providers: Vec<GrantingProvider>,
}

impl PermissionWithGrantedProviders {
    /// Create an ungranted result with an empty provider list.
    pub fn ungranted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_granted: false,
            providers: Vec::new(),
        }
    }

    /// Record a granting provider, marking the aggregate as granted.
    pub fn record_grant(
        &mut self,
        provider_name: impl Into<String>,
        provider_key: impl Into<String>,
    ) {
        self.is_granted = true;
        self.providers.push(GrantingProvider {
            provider_name: provider_name.into(),
            provider_key: provider_key.into(),
        });
    }

    /// The permission name the query was made for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether any provider granted the permission.
    pub fn is_granted(&self) -> bool {
        self.is_granted
    }

    /// Every granting provider, in provider configuration order.
    pub fn granting_providers(&self) -> &[GrantingProvider] {
        &self.providers
    }
}
