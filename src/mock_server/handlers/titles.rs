//! Title and resource endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{rmapi_error, SearchQuery, SharedState};
use crate::mock_server::state::MockState;
use crate::{PackageId, ResourceId, ResourcePut, Title, TitleCreated, TitlePost, Titles};

fn search_titles(state: &MockState, package: Option<PackageId>, query: &SearchQuery) -> Titles {
    let search_field = query.searchfield.as_deref().unwrap_or("titlename");
    let package_filter: Vec<u64> = query
        .packageidfilter
        .as_deref()
        .map(|ids| ids.split(',').filter_map(|id| id.parse().ok()).collect())
        .unwrap_or_default();

    let mut titles: Vec<Title> = state
        .list_titles(package, search_field, query.term())
        .into_iter()
        .filter(|t| match query.selection() {
            Some("selected") => t.resources().iter().any(|r| r.is_selected),
            Some("notselected") => t.resources().iter().all(|r| !r.is_selected),
            _ => true,
        })
        .filter(|t| {
            package_filter.is_empty()
                || t.resources()
                    .iter()
                    .any(|r| package_filter.contains(&r.package_id))
        })
        .collect();
    if query.sorts_by_name() {
        titles.sort_by_key(|t| t.title_name.to_lowercase());
    }
    let total = titles.len() as u64;

    Titles {
        total_results: Some(total),
        title_list: query.paginate(titles).into_iter().map(Some).collect(),
    }
}

/// GET /rm/rmaccounts/{cust}/titles
pub async fn list_titles(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    Json(search_titles(&state, None, &query))
}

/// GET /rm/rmaccounts/{cust}/titles/{id}
pub async fn get_title(
    State(state): State<SharedState>,
    Path((_customer_id, title_id)): Path<(String, u64)>,
) -> Response {
    let state = state.read().await;

    match state.titles.get(&title_id) {
        Some(title) => Json(title.clone()).into_response(),
        None => rmapi_error(StatusCode::NOT_FOUND, "Title not found"),
    }
}

/// GET /rm/rmaccounts/{cust}/vendors/{id}/packages/{id}/titles
pub async fn list_package_titles(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id, package_id)): Path<(String, u64, u64)>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let state = state.read().await;

    if !state.packages.contains_key(&(vendor_id, package_id)) {
        return rmapi_error(StatusCode::NOT_FOUND, "Package not found");
    }
    let package = PackageId::new(vendor_id, package_id);
    Json(search_titles(&state, Some(package), &query)).into_response()
}

/// POST /rm/rmaccounts/{cust}/vendors/{id}/packages/{id}/titles
pub async fn create_title(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id, package_id)): Path<(String, u64, u64)>,
    Json(params): Json<TitlePost>,
) -> Response {
    let mut state = state.write().await;

    match state.add_title(PackageId::new(vendor_id, package_id), params) {
        Some(title_id) => Json(TitleCreated { title_id }).into_response(),
        None => rmapi_error(StatusCode::NOT_FOUND, "Package not found"),
    }
}

/// GET /rm/rmaccounts/{cust}/vendors/{id}/packages/{id}/titles/{id}
pub async fn get_resource(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id, package_id, title_id)): Path<(String, u64, u64, u64)>,
) -> Response {
    let state = state.read().await;

    match state.get_resource(ResourceId::new(vendor_id, package_id, title_id)) {
        Some(resource) => Json(resource).into_response(),
        None => rmapi_error(StatusCode::NOT_FOUND, "Resource not found"),
    }
}

/// PUT /rm/rmaccounts/{cust}/vendors/{id}/packages/{id}/titles/{id}
pub async fn update_resource(
    State(state): State<SharedState>,
    Path((_customer_id, vendor_id, package_id, title_id)): Path<(String, u64, u64, u64)>,
    Json(params): Json<ResourcePut>,
) -> Response {
    let mut state = state.write().await;

    if state.update_resource(ResourceId::new(vendor_id, package_id, title_id), params) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        rmapi_error(StatusCode::NOT_FOUND, "Resource not found")
    }
}
