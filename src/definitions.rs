//! Permission definitions and their registry.
//!
//! A [`PermissionDefinition`] is static metadata about a named capability:
//! which providers are allowed to grant it. The [`PermissionDefinitionRegistry`]
//! holds every definition the application knows about and is the authority the
//! manager consults before touching any provider.
//!
//! # Example
//!
//! ```rust
//! use permission_server::definitions::{PermissionDefinition, PermissionDefinitionRegistry};
//!
//! let mut registry = PermissionDefinitionRegistry::new();
//! registry.register(PermissionDefinition::new("orders.read"));
//! registry.register(
//!     PermissionDefinition::new("orders.admin").with_provider("role"),
//! );
//!
//! let definition = registry.get("orders.admin").unwrap();
//! assert!(definition.allows_provider("role"));
//! assert!(!definition.allows_provider("user"));
//! ```

use crate::error::{PermissionError, PermissionResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static metadata for a named permission.
///
/// The allowed-provider list restricts which providers may grant the
/// permission. An empty list means every configured provider is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    name: String,
    providers: Vec<String>,
}

impl PermissionDefinition {
    /// Create a definition granted by any provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            providers: Vec::new(),
        }
    }

    /// Restrict the definition to an additional allowed provider name.
    pub fn with_provider(mut self, provider_name: impl Into<String>) -> Self {
        self.providers.push(provider_name.into());
        self
    }

    /// The unique permission name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provider names allowed to grant this permission (empty = allow all).
    pub fn allowed_providers(&self) -> &[String] {
        &self.providers
    }

    /// Whether the named provider may grant this permission.
    pub fn allows_provider(&self, provider_name: &str) -> bool {
        self.providers.is_empty() || self.providers.iter().any(|p| p == provider_name)
    }
}

/// Registry of every permission definition known to the application.
///
/// Populated once at startup and treated as read-only afterwards. Lookup by
/// an unregistered name is an error per the definition manager's contract.
#[derive(Debug, Clone, Default)]
pub struct PermissionDefinitionRegistry {
    definitions: HashMap<String, PermissionDefinition>,
}

impl PermissionDefinitionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous definition of the same name.
    pub fn register(&mut self, definition: PermissionDefinition) -> &mut Self {
        self.definitions
            .insert(definition.name().to_string(), definition);
        self
    }

    /// Look up a definition by name.
    ///
    /// # Errors
    /// Returns [`PermissionError::UndefinedPermission`] if the name is unknown.
    pub fn get(&self, name: &str) -> PermissionResult<&PermissionDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| PermissionError::undefined_permission(name))
    }

    /// Look up a definition by name, returning `None` when unknown.
    pub fn find(&self, name: &str) -> Option<&PermissionDefinition> {
        self.definitions.get(name)
    }

    /// All registered permission names, sorted for deterministic iteration.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
