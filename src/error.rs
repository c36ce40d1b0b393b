//! Error types for permission management operations.
//!
//! This module provides the error surface for permission evaluation and
//! manager construction, with convenience result aliases. Storage-level
//! errors live in [`crate::storage::errors`] and tenant management errors
//! in [`crate::tenants`].

/// Main error type for permission evaluation and mutation.
///
/// Covers everything that can go wrong while resolving or changing a grant:
/// undefined permissions, provider mismatches, and failures bubbled up from
/// individual grant providers.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    /// The permission name is not registered in the definition registry.
    #[error("Undefined permission: {name}")]
    UndefinedPermission { name: String },

    /// No configured provider carries the requested name (write path only;
    /// the read path treats an inapplicable provider as an ungranted result).
    #[error("Unknown permission provider: {name}")]
    UnknownProvider { name: String },

    /// The permission definition restricts its providers and the named
    /// provider is not among them.
    #[error("Permission '{permission}' is not compatible with provider '{provider}'")]
    ProviderNotCompatible { permission: String, provider: String },

    /// A grant provider failed while checking or setting a grant.
    ///
    /// Provider failures are never swallowed: a partial aggregate built on
    /// incomplete provider data must not be returned as "ungranted".
    #[error("Provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PermissionError {
    /// Create an undefined-permission error.
    pub fn undefined_permission(name: impl Into<String>) -> Self {
        Self::UndefinedPermission { name: name.into() }
    }

    /// Create an unknown-provider error.
    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider { name: name.into() }
    }

    /// Create a provider-compatibility error.
    pub fn provider_not_compatible(
        permission: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self::ProviderNotCompatible {
            permission: permission.into(),
            provider: provider.into(),
        }
    }

    /// Wrap a provider's error.
    pub fn provider_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider(Box::new(error))
    }
}

/// Errors that can occur while building a [`crate::manager::PermissionManager`].
///
/// These are configuration mistakes and should surface during startup rather
/// than at evaluation time.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A definition registry was not supplied to the builder.
    #[error("Permission definition registry is required but not provided")]
    MissingDefinitions,

    /// The builder was finalized without a single provider.
    #[error("At least one permission provider is required")]
    NoProviders,

    /// Two providers were registered under the same name.
    #[error("Duplicate provider name: {name}")]
    DuplicateProviderName { name: String },
}

// Result type aliases for convenience
pub type PermissionResult<T> = Result<T, PermissionError>;
pub type BuildResult<T> = Result<T, BuildError>;
