//! E2E tests using the mock RMAPI server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use std::sync::Arc;

use holdingsiq::mock_server::{Fixtures, MockServer, MockState, MOCK_API_KEY, MOCK_CUSTOMER_ID};
use holdingsiq::{
    get_load_status, get_resource, get_vendor_id, populate_holdings, select_resource,
    CachedConfigurationService, ConfigurationService, Create, Delete, FilterQuery, Get,
    HoldingsClient, HoldingsError, KbCredentialsService, List, OkapiData, PackageByIdData,
    PackageData, PackageId, PackageListQuery, PackagePost, PackagePut, ResourceId,
    ResourceSelectedPayload, Title, TitleListQuery, TitlePost, TtlCache, Update, Vendor,
    VendorById, VendorListQuery,
};

fn client(server: &MockServer) -> HoldingsClient {
    HoldingsClient::new(MOCK_CUSTOMER_ID, MOCK_API_KEY, server.url()).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let result = reqwest::get(format!("{}/health", url)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_wrong_api_key_is_unauthorized() {
    let server = MockServer::start().await;
    let client = HoldingsClient::new(MOCK_CUSTOMER_ID, "wrong", server.url()).unwrap();

    let err = VendorById::get(&client, 19).await.unwrap_err();
    assert!(matches!(err, HoldingsError::Unauthorized { status_code: 401, .. }));

    server.shutdown().await;
}

// =============================================================================
// Credential Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_credentials_resolve_verify_and_use() {
    let server = MockServer::start().await;
    let service = CachedConfigurationService::new(
        KbCredentialsService::new().unwrap(),
        Arc::new(TtlCache::default()),
    );
    let okapi = OkapiData::new([
        ("X-Okapi-Url", server.url().to_string()),
        ("X-Okapi-Tenant", "diku".to_string()),
        ("X-Okapi-User-Id", "user-1".to_string()),
    ])
    .unwrap();

    // Step 1: Resolve credentials through Okapi
    let config = service.retrieve_configuration(&okapi).await.unwrap();
    assert_eq!(config.customer_id.as_deref(), Some(MOCK_CUSTOMER_ID));

    // Step 2: Verify them against RMAPI
    let errors = service.verify_credentials(&config, &okapi).await.unwrap();
    assert!(errors.is_empty(), "{errors:?}");
    assert!(service.retrieve_configuration(&okapi).await.unwrap().is_valid());

    // Step 3: Use them
    let client = HoldingsClient::from_configuration(&config).unwrap();
    assert_eq!(get_vendor_id(&client).await.unwrap(), 19);

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_credentials() {
    let server = MockServer::start_empty().await;
    let okapi = OkapiData::new([("X-Okapi-Url", server.url().to_string())]).unwrap();

    let err = KbCredentialsService::new()
        .unwrap()
        .retrieve_configuration(&okapi)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

// =============================================================================
// Vendor and Package Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_search_vendors_then_list_their_packages() {
    let server = MockServer::start().await;
    let client = client(&server);

    let query = VendorListQuery {
        q: Some("ebsco".to_string()),
        sort: None,
    };
    let vendors = Vendor::list_page(&client, &query, 1, 25).await.unwrap();
    assert_eq!(vendors.total, Some(1));
    let vendor_id = vendors.items[0].vendor_id;

    let packages = PackageData::list_all(&client, &PackageListQuery::for_provider(vendor_id))
        .await
        .unwrap();
    let names: Vec<&str> = packages.iter().map(|p| p.package_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Academic Search Complete", "Business Source Premier"]
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_package_selection_filter() {
    let server = MockServer::start().await;
    let client = client(&server);

    let query = PackageListQuery {
        filter_selected: Some("selected".to_string()),
        ..Default::default()
    };
    let page = PackageData::list_page(&client, &query, 1, 25).await.unwrap();

    assert_eq!(page.total, Some(1));
    assert_eq!(page.items[0].full_id(), PackageId::new(19, 3964));

    server.shutdown().await;
}

#[tokio::test]
async fn test_select_and_deselect_package_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);
    let id = PackageId::new(19, 4010);

    let before = PackageByIdData::get(&client, id).await.unwrap();
    assert!(!before.is_selected);

    let put = PackagePut {
        is_selected: Some(true),
        ..Default::default()
    };
    let after = PackageByIdData::update(&client, id, put).await.unwrap();
    assert!(after.is_selected);

    PackageByIdData::delete(&client, id).await.unwrap();
    let deselected = PackageByIdData::get(&client, id).await.unwrap();
    assert!(!deselected.is_selected);

    server.shutdown().await;
}

#[tokio::test]
async fn test_custom_package_and_title_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);

    // Custom content lives under the account's own vendor
    let vendor_id = get_vendor_id(&client).await.unwrap();

    let package = PackageByIdData::create(
        &client,
        vendor_id,
        PackagePost {
            package_name: "Local Collection".to_string(),
            content_type: 1,
            custom_coverage: None,
        },
    )
    .await
    .unwrap();
    assert!(package.is_custom);

    let title = Title::create(
        &client,
        package.full_id(),
        TitlePost {
            title_name: "Local Newsletter".to_string(),
            pub_type: Some("Newsletter".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(title.is_title_custom);

    let query = TitleListQuery {
        package: Some(package.full_id()),
        ..Default::default()
    };
    let titles = Title::list_all(&client, &query).await.unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].title_name, "Local Newsletter");

    let vendor = VendorById::get(&client, vendor_id).await.unwrap();
    assert_eq!(vendor.packages_total, 3);

    server.shutdown().await;
}

// =============================================================================
// Title and Resource Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_search_titles_by_isxn() {
    let server = MockServer::start().await;
    let client = client(&server);

    let query = TitleListQuery {
        filter: FilterQuery::by_isxn("1362-3613"),
        ..Default::default()
    };
    let page = Title::list_page(&client, &query, 1, 25).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title_name, "Journal of Test Studies");
    assert_eq!(page.items[0].resources().len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_titles_without_resources_are_hidden() {
    let state = MockState::new()
        .with_title(Fixtures::title(1, "Held", &[(19, 1, true)]))
        .with_title(Fixtures::title(2, "Orphan", &[]));
    let server = MockServer::with_state(state).await;
    let client = HoldingsClient::new("any", "any", server.url()).unwrap();

    let page = Title::list_page(&client, &TitleListQuery::default(), 1, 25)
        .await
        .unwrap();

    assert_eq!(page.total, Some(1));
    assert_eq!(page.items[0].title_name, "Held");

    server.shutdown().await;
}

#[tokio::test]
async fn test_select_resource_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);
    let id = ResourceId::new(20, 5207, 101);

    let before = get_resource(&client, id).await.unwrap();
    assert!(!before.resources()[0].is_selected);

    let after = select_resource(&client, id, &ResourceSelectedPayload::selected(true))
        .await
        .unwrap();
    assert_eq!(after.resources().len(), 1);
    assert!(after.resources()[0].is_selected);

    // Other packages' resources for the same title are untouched
    let title = Title::get(&client, 101).await.unwrap();
    assert_eq!(title.resources().len(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = get_resource(&client, ResourceId::new(19, 4010, 101))
        .await
        .unwrap_err();
    assert!(matches!(err, HoldingsError::NotFound { .. }));

    server.shutdown().await;
}

// =============================================================================
// Holdings Load Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_holdings_load_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);

    let transaction = populate_holdings(&client).await.unwrap();
    assert!(transaction.is_some());

    // A second request while the load runs is a conflict, reported as None
    assert!(populate_holdings(&client).await.unwrap().is_none());

    let running = get_load_status(&client).await.unwrap();
    assert!(!running.is_completed());

    let done = get_load_status(&client).await.unwrap();
    assert!(done.is_completed());
    assert_eq!(done.total_count, Some(3));

    server.shutdown().await;
}
