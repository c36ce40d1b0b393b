//! Shared fixtures for integration tests.

use async_trait::async_trait;
use permission_server::{
    GrantCheck, PermissionDefinition, PermissionDefinitionRegistry, PermissionError,
    PermissionProvider, PermissionResult, TenantScope,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Registry used throughout the suites: one unrestricted permission and one
/// restricted to the "role" provider (the worked example from the docs).
pub fn orders_registry() -> PermissionDefinitionRegistry {
    let mut registry = PermissionDefinitionRegistry::new();
    registry.register(PermissionDefinition::new("orders.read"));
    registry.register(PermissionDefinition::new("orders.admin").with_provider("role"));
    registry
}

/// Scripted provider that counts its check invocations.
///
/// Grants exactly the (permission, provider key) pairs it was scripted with,
/// but only when queried under its own provider name.
pub struct StubProvider {
    name: String,
    grants: HashSet<(String, String)>,
    derived_grants: HashSet<(String, String)>,
    checks: Arc<AtomicUsize>,
    fail_checks: bool,
}

impl StubProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            grants: HashSet::new(),
            derived_grants: HashSet::new(),
            checks: Arc::new(AtomicUsize::new(0)),
            fail_checks: false,
        }
    }

    /// Script a grant of `permission` to `provider_key`, honored only when
    /// the check asks about this provider's own name.
    pub fn granting(mut self, permission: &str, provider_key: &str) -> Self {
        self.grants
            .insert((permission.to_string(), provider_key.to_string()));
        self
    }

    /// Script a grant honored regardless of the queried provider name
    /// (models derived grants, e.g. a role provider resolving a user's roles).
    pub fn granting_for_any_caller(mut self, permission: &str, provider_key: &str) -> Self {
        self.derived_grants
            .insert((permission.to_string(), provider_key.to_string()));
        self
    }

    /// Make every check fail.
    pub fn failing(mut self) -> Self {
        self.fail_checks = true;
        self
    }

    /// Handle onto the invocation counter, valid after the provider moves
    /// into a manager.
    pub fn check_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.checks)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("stub provider failure")]
pub struct StubFailure;

#[async_trait]
impl PermissionProvider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(
        &self,
        permission_name: &str,
        provider_name: &str,
        provider_key: &str,
        _tenant: &TenantScope,
    ) -> PermissionResult<GrantCheck> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.fail_checks {
            return Err(PermissionError::provider_error(StubFailure));
        }
        let pair = (permission_name.to_string(), provider_key.to_string());
        let granted = self.derived_grants.contains(&pair)
            || (provider_name == self.name && self.grants.contains(&pair));
        if granted {
            Ok(GrantCheck::granted(provider_key))
        } else {
            Ok(GrantCheck::ungranted())
        }
    }

    async fn set(
        &self,
        _permission_name: &str,
        _provider_key: &str,
        _is_granted: bool,
        _tenant: &TenantScope,
    ) -> PermissionResult<()> {
        Ok(())
    }
}
