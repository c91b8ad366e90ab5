//! Account root, proxies and holdings load handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::SharedState;
use crate::{LoadStatus, RootProxyCustomLabels, TransactionId};

/// GET /rm/rmaccounts/{cust}/
pub async fn get_root(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
) -> impl IntoResponse {
    Json(state.read().await.root.clone())
}

/// PUT /rm/rmaccounts/{cust}/
pub async fn update_root(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
    Json(root): Json<RootProxyCustomLabels>,
) -> impl IntoResponse {
    state.write().await.root = root;
    StatusCode::NO_CONTENT
}

/// GET /rm/rmaccounts/{cust}/proxies
pub async fn get_proxies(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
) -> impl IntoResponse {
    Json(state.read().await.proxies.clone())
}

/// POST /rm/rmaccounts/{cust}/holdings
///
/// Answers 409 while a load is running.
pub async fn populate_holdings(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
) -> Response {
    let mut state = state.write().await;

    if state.load_running {
        return StatusCode::CONFLICT.into_response();
    }
    state.load_running = true;
    state.load_status = LoadStatus {
        status: Some("In Progress".to_string()),
        created: state.load_status.created.clone(),
        total_count: None,
    };

    let transaction = TransactionId {
        transaction_id: Some(format!("load-{}", state.titles.len())),
    };
    (StatusCode::ACCEPTED, Json(transaction)).into_response()
}

/// GET /rm/rmaccounts/{cust}/holdings/status
///
/// A running load reports its progress once and then completes.
pub async fn get_load_status(
    State(state): State<SharedState>,
    Path(_customer_id): Path<String>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    let current = state.load_status.clone();

    if state.load_running {
        state.load_running = false;
        state.load_status = LoadStatus {
            status: Some("Completed".to_string()),
            created: Some(chrono::Utc::now().to_rfc3339()),
            total_count: Some(state.titles.len() as u64),
        };
    }

    Json(current)
}
