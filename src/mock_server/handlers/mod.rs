//! HTTP request handlers for the mock server.

pub mod credentials;
pub mod packages;
pub mod root;
pub mod titles;
pub mod vendors;

pub use credentials::*;
pub use packages::*;
pub use root::*;
pub use titles::*;
pub use vendors::*;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub type SharedState = Arc<RwLock<MockState>>;

/// Query string shared by the RMAPI search endpoints.
///
/// Unknown parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub orderby: Option<String>,
    pub selection: Option<String>,
    pub contenttype: Option<String>,
    pub searchfield: Option<String>,
    pub resourcetype: Option<String>,
    pub searchtype: Option<String>,
    pub packageidfilter: Option<String>,
}

impl SearchQuery {
    /// The search term, `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The selection filter, `None` for `all`.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref().filter(|s| *s != "all")
    }

    pub fn sorts_by_name(&self) -> bool {
        self.orderby.as_deref() != Some("relevance")
    }

    /// Slice out the requested page. `offset` is a 1-based page number.
    pub fn paginate<T>(&self, items: Vec<T>) -> Vec<T> {
        let page = self.offset.unwrap_or(1).max(1) as usize;
        let count = self.count.unwrap_or(25) as usize;
        items.into_iter().skip((page - 1) * count).take(count).collect()
    }
}

/// RMAPI-style error document.
pub fn rmapi_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "Errors": [{ "Code": status.as_u16(), "Message": message, "SubCode": 0 }]
        })),
    )
        .into_response()
}

/// Reject RMAPI requests whose `X-Api-Key` does not match the configured key.
pub async fn require_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_api_key.clone();

    if let Some(expected) = required {
        let provided = request
            .headers()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return rmapi_error(StatusCode::UNAUTHORIZED, "Invalid API key");
        }
    }

    next.run(request).await
}
