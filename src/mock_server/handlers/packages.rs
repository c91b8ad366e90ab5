//! Package endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{rmapi_error, SearchQuery, SharedState};
use crate::mock_server::state::MockState;
use crate::{PackageCreated, PackageData, PackageId, PackagePost, PackagePut, Packages};

fn search_packages(state: &MockState, vendor_id: Option<u64>, query: &SearchQuery) -> Packages {
    let content_type = query.contenttype.as_deref().filter(|t| *t != "all");

    let mut packages: Vec<PackageData> = state
        .list_packages(vendor_id, query.term(), query.selection())
        .into_iter()
        .filter(|p| {
            content_type.map_or(true, |t| {
                p.content_type
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(t))
            })
        })
        .map(|p| p.package.clone())
        .collect();
    if query.sorts_by_name() {
        packages.sort_by_key(|p| p.package_name.to_lowercase());
    }
    let total = packages.len() as u64;

    Packages {
        total_results: Some(total),
        packages_list: query.paginate(packages),
    }
}

/// GET /rm/rmaccounts/{cust}/packages
pub async fn list_packages(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    Json(search_packages(&state, None, &query))
}

/// GET /rm/rmaccounts/{cust}/vendors/{id}/packages
pub async fn list_vendor_packages(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id)): Path<(String, u64)>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let state = state.read().await;

    if !state.vendors.contains_key(&vendor_id) {
        return rmapi_error(StatusCode::NOT_FOUND, "Vendor not found");
    }
    Json(search_packages(&state, Some(vendor_id), &query)).into_response()
}

/// POST /rm/rmaccounts/{cust}/vendors/{id}/packages
pub async fn create_package(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id)): Path<(String, u64)>,
    Json(params): Json<PackagePost>,
) -> Response {
    let mut state = state.write().await;

    match state.add_package(vendor_id, params) {
        Some(package_id) => Json(PackageCreated { package_id }).into_response(),
        None => rmapi_error(StatusCode::NOT_FOUND, "Vendor not found"),
    }
}

/// GET /rm/rmaccounts/{cust}/vendors/{id}/packages/{id}
pub async fn get_package(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id, package_id)): Path<(String, u64, u64)>,
) -> Response {
    let state = state.read().await;

    match state.packages.get(&(vendor_id, package_id)) {
        Some(package) => Json(package.clone()).into_response(),
        None => rmapi_error(StatusCode::NOT_FOUND, "Package not found"),
    }
}

/// PUT /rm/rmaccounts/{cust}/vendors/{id}/packages/{id}
pub async fn update_package(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id, package_id)): Path<(String, u64, u64)>,
    Json(params): Json<PackagePut>,
) -> Response {
    let mut state = state.write().await;

    if state.update_package(PackageId::new(vendor_id, package_id), params) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        rmapi_error(StatusCode::NOT_FOUND, "Package not found")
    }
}
