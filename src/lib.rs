//! Multi-tenant permission management library for Rust.
//!
//! Provides async permission evaluation over an ordered set of pluggable
//! grant providers, with explicit tenant scoping, idempotent grant seeding,
//! and pluggable storage backends.
//!
//! # Core Components
//!
//! - [`PermissionManager`] - Aggregates grant checks across configured providers
//! - [`PermissionProvider`] - Trait for implementing grant sources
//! - [`PermissionDataSeeder`] - Idempotent startup seeding of expected grants
//! - [`GrantStore`](storage::GrantStore) - Trait for grant persistence backends
//!
//! # Quick Start
//!
//! ```rust
//! use permission_server::{
//!     PermissionDefinition, PermissionDefinitionRegistry, PermissionManager, TenantScope,
//! };
//! use permission_server::provider::GrantProvider;
//! use permission_server::storage::InMemoryGrantStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut definitions = PermissionDefinitionRegistry::new();
//! definitions.register(PermissionDefinition::new("orders.read"));
//! definitions.register(PermissionDefinition::new("orders.admin").with_provider("role"));
//!
//! let store = InMemoryGrantStore::new();
//! let manager = PermissionManager::builder()
//!     .with_definitions(definitions)
//!     .with_provider(GrantProvider::role(store.clone()))
//!     .with_provider(GrantProvider::user(store))
//!     .build()?;
//!
//! manager
//!     .set("orders.admin", "role", "admin-group", true, &TenantScope::Global)
//!     .await?;
//! let result = manager
//!     .get("orders.admin", "role", "admin-group", &TenantScope::Global)
//!     .await?;
//! assert!(result.is_granted());
//! # Ok(())
//! # }
//! ```

pub mod definitions;
pub mod error;
pub mod grant;
pub mod manager;
pub mod provider;
pub mod seeder;
pub mod storage;
pub mod tenant;
pub mod tenants;

// Re-export commonly used types for convenience
pub use definitions::{PermissionDefinition, PermissionDefinitionRegistry};
pub use error::{BuildError, BuildResult, PermissionError, PermissionResult};
pub use grant::{GrantCheck, GrantingProvider, PermissionGrant, PermissionWithGrantedProviders};
pub use manager::{PermissionManager, PermissionManagerBuilder};
pub use provider::{GrantProvider, PermissionProvider};
pub use seeder::PermissionDataSeeder;
pub use tenant::TenantScope;

// Storage and tenant-management types
pub use storage::{GrantKey, GrantStore, InMemoryGrantStore, StorageError};
pub use tenants::{InMemoryTenantStore, Tenant, TenantError, TenantService, TenantStore};
