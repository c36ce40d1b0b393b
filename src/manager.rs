//! Permission evaluation across an ordered set of providers.
//!
//! The [`PermissionManager`] is the crate's front door for permission
//! queries. Given a permission name and a (provider name, provider key) pair
//! it consults the definition registry, applies the allowed-provider
//! short-circuit, and otherwise asks every configured provider in
//! registration order, aggregating the result with a logical OR while
//! recording every provider that granted.
//!
//! Providers are supplied up front through [`PermissionManagerBuilder`]; the
//! list is fixed for the manager's lifetime, so provider configuration
//! changes require building a new manager.
//!
//! # Example
//!
//! ```rust
//! use permission_server::definitions::{PermissionDefinition, PermissionDefinitionRegistry};
//! use permission_server::manager::PermissionManager;
//! use permission_server::provider::GrantProvider;
//! use permission_server::storage::InMemoryGrantStore;
//! use permission_server::tenant::TenantScope;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = PermissionDefinitionRegistry::new();
//! registry.register(PermissionDefinition::new("orders.read"));
//!
//! let store = InMemoryGrantStore::new();
//! let manager = PermissionManager::builder()
//!     .with_definitions(registry)
//!     .with_provider(GrantProvider::role(store.clone()))
//!     .with_provider(GrantProvider::user(store))
//!     .build()?;
//!
//! let result = manager
//!     .get("orders.read", "user", "alice", &TenantScope::Global)
//!     .await?;
//! assert!(!result.is_granted());
//! # Ok(())
//! # }
//! ```

use crate::definitions::{PermissionDefinition, PermissionDefinitionRegistry};
use crate::error::{BuildError, BuildResult, PermissionError, PermissionResult};
use crate::grant::PermissionWithGrantedProviders;
use crate::provider::PermissionProvider;
use crate::tenant::TenantScope;
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

/// Aggregating permission manager over an ordered provider list.
pub struct PermissionManager {
    definitions: Arc<PermissionDefinitionRegistry>,
    providers: Vec<Arc<dyn PermissionProvider>>,
}

impl std::fmt::Debug for PermissionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionManager")
            .field("definitions", &self.definitions)
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PermissionManager {
    /// Start building a manager.
    pub fn builder() -> PermissionManagerBuilder {
        PermissionManagerBuilder::new()
    }

    /// Resolve a permission for a (provider name, provider key) pair.
    ///
    /// # Errors
    /// * [`PermissionError::UndefinedPermission`] if the name is not registered.
    /// * Any provider failure, which aborts the aggregation.
    ///
    /// A provider-restriction mismatch is not an error: the result is a
    /// well-formed ungranted aggregate and no provider is queried.
    pub async fn get(
        &self,
        permission_name: &str,
        provider_name: &str,
        provider_key: &str,
        tenant: &TenantScope,
    ) -> PermissionResult<PermissionWithGrantedProviders> {
        let definition = self.definitions.get(permission_name)?;
        self.get_internal(definition, provider_name, provider_key, tenant)
            .await
    }

    /// Grant or revoke a permission through the named provider.
    ///
    /// No-ops when the aggregate state already matches `is_granted`, so
    /// setting an already-granted permission does not create a second grant.
    ///
    /// # Errors
    /// * [`PermissionError::UndefinedPermission`] if the name is not registered.
    /// * [`PermissionError::ProviderNotCompatible`] if the definition
    ///   restricts providers and `provider_name` is not allowed. Unlike the
    ///   read path, the write path treats this as an error.
    /// * [`PermissionError::UnknownProvider`] if no configured provider
    ///   carries `provider_name`.
    pub async fn set(
        &self,
        permission_name: &str,
        provider_name: &str,
        provider_key: &str,
        is_granted: bool,
        tenant: &TenantScope,
    ) -> PermissionResult<()> {
        let definition = self.definitions.get(permission_name)?;
        if !definition.allows_provider(provider_name) {
            return Err(PermissionError::provider_not_compatible(
                permission_name,
                provider_name,
            ));
        }

        let current = self
            .get_internal(definition, provider_name, provider_key, tenant)
            .await?;
        if current.is_granted() == is_granted {
            debug!(
                "set '{}' for '{}/{}' in {}: already {}",
                permission_name,
                provider_name,
                provider_key,
                tenant,
                if is_granted { "granted" } else { "revoked" }
            );
            return Ok(());
        }

        let provider = self
            .providers
            .iter()
            .find(|p| p.name() == provider_name)
            .ok_or_else(|| PermissionError::unknown_provider(provider_name))?;

        provider
            .set(permission_name, provider_key, is_granted, tenant)
            .await
    }

    /// The configured provider names, in query order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    async fn get_internal(
        &self,
        definition: &PermissionDefinition,
        provider_name: &str,
        provider_key: &str,
        tenant: &TenantScope,
    ) -> PermissionResult<PermissionWithGrantedProviders> {
        let mut result = PermissionWithGrantedProviders::ungranted(definition.name());

        if !definition.allows_provider(provider_name) {
            debug!(
                "'{}' does not allow provider '{}', short-circuiting ungranted",
                definition.name(),
                provider_name
            );
            return Ok(result);
        }

        // Sequential, in registration order: the aggregate's provider list is
        // deterministic and a provider failure aborts before later providers run.
        for provider in &self.providers {
            let check = provider
                .check(definition.name(), provider_name, provider_key, tenant)
                .await?;
            if check.is_granted {
                let granted_key = check
                    .provider_key
                    .unwrap_or_else(|| provider_key.to_string());
                result.record_grant(provider.name(), granted_key);
            }
        }

        Ok(result)
    }
}

/// Builder assembling a [`PermissionManager`].
///
/// The provider list is ordered: providers are queried in the order they are
/// passed to [`with_provider`](Self::with_provider).
#[derive(Default)]
pub struct PermissionManagerBuilder {
    definitions: Option<PermissionDefinitionRegistry>,
    providers: Vec<Arc<dyn PermissionProvider>>,
}

impl PermissionManagerBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the definition registry.
    pub fn with_definitions(mut self, definitions: PermissionDefinitionRegistry) -> Self {
        self.definitions = Some(definitions);
        self
    }

    /// Append a provider to the query order.
    pub fn with_provider(mut self, provider: impl PermissionProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Append an already-shared provider to the query order.
    pub fn with_shared_provider(mut self, provider: Arc<dyn PermissionProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Finalize the manager.
    ///
    /// # Errors
    /// * [`BuildError::MissingDefinitions`] without a registry.
    /// * [`BuildError::NoProviders`] without at least one provider.
    /// * [`BuildError::DuplicateProviderName`] if two providers share a name.
    pub fn build(self) -> BuildResult<PermissionManager> {
        let definitions = self.definitions.ok_or(BuildError::MissingDefinitions)?;
        if self.providers.is_empty() {
            return Err(BuildError::NoProviders);
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.name().to_string()) {
                return Err(BuildError::DuplicateProviderName {
                    name: provider.name().to_string(),
                });
            }
        }

        debug!(
            "permission manager built with {} definitions and providers {:?}",
            definitions.len(),
            self.providers.iter().map(|p| p.name()).collect::<Vec<_>>()
        );

        Ok(PermissionManager {
            definitions: Arc::new(definitions),
            providers: self.providers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::PermissionDefinition;
    use crate::provider::GrantProvider;
    use crate::storage::InMemoryGrantStore;

    fn registry() -> PermissionDefinitionRegistry {
        let mut registry = PermissionDefinitionRegistry::new();
        registry.register(PermissionDefinition::new("orders.read"));
        registry.register(PermissionDefinition::new("orders.admin").with_provider("role"));
        registry
    }

    #[test]
    fn test_builder_requires_definitions() {
        let error = PermissionManager::builder()
            .with_provider(GrantProvider::role(InMemoryGrantStore::new()))
            .build()
            .unwrap_err();
        assert!(matches!(error, BuildError::MissingDefinitions));
    }

    #[test]
    fn test_builder_requires_providers() {
        let error = PermissionManager::builder()
            .with_definitions(registry())
            .build()
            .unwrap_err();
        assert!(matches!(error, BuildError::NoProviders));
    }

    #[test]
    fn test_builder_rejects_duplicate_provider_names() {
        let store = InMemoryGrantStore::new();
        let error = PermissionManager::builder()
            .with_definitions(registry())
            .with_provider(GrantProvider::role(store.clone()))
            .with_provider(GrantProvider::role(store))
            .build()
            .unwrap_err();
        assert!(matches!(error, BuildError::DuplicateProviderName { .. }));
    }

    #[test]
    fn test_provider_order_is_registration_order() {
        let store = InMemoryGrantStore::new();
        let manager = PermissionManager::builder()
            .with_definitions(registry())
            .with_provider(GrantProvider::user(store.clone()))
            .with_provider(GrantProvider::role(store))
            .build()
            .unwrap();
        assert_eq!(manager.provider_names(), vec!["user", "role"]);
    }

    #[tokio::test]
    async fn test_get_undefined_permission() {
        let manager = PermissionManager::builder()
            .with_definitions(registry())
            .with_provider(GrantProvider::role(InMemoryGrantStore::new()))
            .build()
            .unwrap();

        let error = manager
            .get("orders.missing", "role", "admin", &TenantScope::Global)
            .await
            .unwrap_err();
        assert!(matches!(error, PermissionError::UndefinedPermission { .. }));
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let store = InMemoryGrantStore::new();
        let manager = PermissionManager::builder()
            .with_definitions(registry())
            .with_provider(GrantProvider::role(store.clone()))
            .with_provider(GrantProvider::user(store))
            .build()
            .unwrap();
        let tenant = TenantScope::tenant("acme");

        manager
            .set("orders.read", "user", "alice", true, &tenant)
            .await
            .unwrap();

        let result = manager
            .get("orders.read", "user", "alice", &tenant)
            .await
            .unwrap();
        assert!(result.is_granted());
        assert_eq!(result.granting_providers().len(), 1);
        assert_eq!(result.granting_providers()[0].provider_name, "user");

        // Setting the same state again is a no-op rather than a duplicate insert.
        manager
            .set("orders.read", "user", "alice", true, &tenant)
            .await
            .unwrap();

        manager
            .set("orders.read", "user", "alice", false, &tenant)
            .await
            .unwrap();
        let result = manager
            .get("orders.read", "user", "alice", &tenant)
            .await
            .unwrap();
        assert!(!result.is_granted());
    }

    #[tokio::test]
    async fn test_set_rejects_incompatible_provider() {
        let manager = PermissionManager::builder()
            .with_definitions(registry())
            .with_provider(GrantProvider::user(InMemoryGrantStore::new()))
            .build()
            .unwrap();

        let error = manager
            .set("orders.admin", "user", "alice", true, &TenantScope::Global)
            .await
            .unwrap_err();
        assert!(matches!(error, PermissionError::ProviderNotCompatible { .. }));
    }

    #[tokio::test]
    async fn test_set_unknown_provider() {
        let manager = PermissionManager::builder()
            .with_definitions(registry())
            .with_provider(GrantProvider::user(InMemoryGrantStore::new()))
            .build()
            .unwrap();

        // "role" is allowed by the definition but not configured.
        let error = manager
            .set("orders.admin", "role", "admins", true, &TenantScope::Global)
            .await
            .unwrap_err();
        assert!(matches!(error, PermissionError::UnknownProvider { .. }));
    }
}
