//! Tenant scoping for multi-tenant permission checks.
//!
//! Every check, set, and seed operation takes an explicit [`TenantScope`].
//! Grants stored under one scope are invisible to every other scope: a tenant
//! grant never satisfies a global check and vice versa.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The tenancy boundary a permission operation runs under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenantScope {
    /// Host-level scope, outside any tenant.
    Global,
    /// A specific tenant, identified by its id.
    Tenant(String),
}

impl TenantScope {
    /// Create a tenant scope for the given tenant id.
    pub fn tenant(id: impl Into<String>) -> Self {
        Self::Tenant(id.into())
    }

    /// The tenant id, if this scope is tenant-bound.
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Tenant(id) => Some(id),
        }
    }

    /// Whether this is the host-level scope.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl Default for TenantScope {
    fn default() -> Self {
        Self::Global
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Tenant(id) => write!(f, "tenant:{}", id),
        }
    }
}
