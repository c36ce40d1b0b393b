//! Tenant management service behavior.

use permission_server::tenants::{InMemoryTenantStore, TenantError, TenantService};

#[tokio::test]
async fn create_get_rename_delete_roundtrip() {
    let service = TenantService::new(InMemoryTenantStore::new());

    let tenant = service.create("acme").await.unwrap();
    assert_eq!(service.get(tenant.id()).await.unwrap().name(), "acme");

    let renamed = service.rename(tenant.id(), "acme-corp").await.unwrap();
    assert_eq!(renamed.id(), tenant.id());
    assert_eq!(renamed.name(), "acme-corp");
    assert!(service.find_by_name("acme").await.unwrap().is_none());

    service.delete(tenant.id()).await.unwrap();
    let error = service.get(tenant.id()).await.unwrap_err();
    assert!(matches!(error, TenantError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_names_rejected() {
    let service = TenantService::new(InMemoryTenantStore::new());
    service.create("acme").await.unwrap();

    let error = service.create("acme").await.unwrap_err();
    assert!(matches!(error, TenantError::DuplicateName { .. }));

    let other = service.create("globex").await.unwrap();
    let error = service.rename(other.id(), "acme").await.unwrap_err();
    assert!(matches!(error, TenantError::DuplicateName { .. }));

    // Renaming a tenant to its current name is allowed.
    service.rename(other.id(), "globex").await.unwrap();
}

#[tokio::test]
async fn delete_unknown_tenant_is_not_found() {
    let service = TenantService::new(InMemoryTenantStore::new());
    let error = service.delete("missing-id").await.unwrap_err();
    assert!(matches!(error, TenantError::NotFound { .. }));
}

#[tokio::test]
async fn listing_is_name_ordered_and_paged() {
    let service = TenantService::new(InMemoryTenantStore::new());
    for name in ["delta", "alpha", "charlie", "bravo"] {
        service.create(name).await.unwrap();
    }

    assert_eq!(service.count().await.unwrap(), 4);

    let first_page = service.list(0, 2).await.unwrap();
    let names: Vec<&str> = first_page.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["alpha", "bravo"]);

    let second_page = service.list(2, 2).await.unwrap();
    let names: Vec<&str> = second_page.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["charlie", "delta"]);

    assert!(service.list(4, 2).await.unwrap().is_empty());
}
