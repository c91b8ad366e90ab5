//! Vendor endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{rmapi_error, SearchQuery, SharedState};
use crate::{Vendor, VendorById, VendorPut, Vendors};

fn summary(vendor: &VendorById) -> Vendor {
    Vendor {
        vendor_id: vendor.vendor_id,
        vendor_name: vendor.vendor_name.clone(),
        packages_total: vendor.packages_total,
        packages_selected: vendor.packages_selected,
        is_customer: vendor.is_customer,
        vendor_token: vendor.vendor_token.clone(),
    }
}

/// GET /rm/rmaccounts/{cust}/vendors
pub async fn list_vendors(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let mut vendors: Vec<Vendor> = state
        .list_vendors(query.term())
        .into_iter()
        .map(summary)
        .collect();
    if query.sorts_by_name() {
        vendors.sort_by_key(|v| v.vendor_name.to_lowercase());
    }
    let total = vendors.len() as u64;

    Json(Vendors {
        total_results: Some(total),
        vendors: query.paginate(vendors),
    })
}

/// GET /rm/rmaccounts/{cust}/vendors/{id}
pub async fn get_vendor(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id)): Path<(String, u64)>,
) -> Response {
    let state = state.read().await;

    match state.vendors.get(&vendor_id) {
        Some(vendor) => Json(vendor.clone()).into_response(),
        None => rmapi_error(StatusCode::NOT_FOUND, "Vendor not found"),
    }
}

/// PUT /rm/rmaccounts/{cust}/vendors/{id}
pub async fn update_vendor(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id)): Path<(String, u64)>,
    Json(params): Json<VendorPut>,
) -> Response {
    let mut state = state.write().await;

    if state.update_vendor(vendor_id, params) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        rmapi_error(StatusCode::NOT_FOUND, "Vendor not found")
    }
}
