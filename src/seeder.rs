//! Idempotent grant seeding.
//!
//! [`PermissionDataSeeder`] inserts the grants an application expects to
//! exist at startup: for each permission name it checks the store and inserts
//! a fresh grant only when none exists. Re-running a seed is always safe and
//! produces no duplicates.
//!
//! Two seeders racing on the same key can both pass the existence check; the
//! store's uniqueness constraint then fails one insert with a duplicate-grant
//! error. The seeder does not retry, the caller decides.

use crate::grant::PermissionGrant;
use crate::storage::{GrantKey, GrantStore};
use crate::tenant::TenantScope;
use log::{debug, info};

/// Seeds missing grants for a (provider name, provider key) pair.
#[derive(Debug, Clone)]
pub struct PermissionDataSeeder<S: GrantStore> {
    store: S,
}

impl<S: GrantStore> PermissionDataSeeder<S> {
    /// Create a seeder over the given grant store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Insert a grant for each named permission that does not already have one.
    ///
    /// # Returns
    /// The number of grants actually inserted.
    ///
    /// # Errors
    /// Propagates store errors, including the duplicate-grant error raised
    /// when a concurrent seeder wins the insert race.
    pub async fn seed<I, T>(
        &self,
        provider_name: &str,
        provider_key: &str,
        granted_permissions: I,
        tenant: &TenantScope,
    ) -> Result<usize, S::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut inserted = 0;

        for permission_name in granted_permissions {
            let permission_name = permission_name.into();
            let key = GrantKey::new(
                tenant.clone(),
                &permission_name,
                provider_name,
                provider_key,
            );

            if self.store.find(&key).await?.is_some() {
                debug!("seed: {} already granted, skipping", key);
                continue;
            }

            self.store
                .insert(PermissionGrant::new(
                    &permission_name,
                    provider_name,
                    provider_key,
                    tenant.clone(),
                ))
                .await?;
            inserted += 1;
        }

        info!(
            "seeded {} grant(s) for '{}/{}' in {}",
            inserted, provider_name, provider_key, tenant
        );
        Ok(inserted)
    }
}
