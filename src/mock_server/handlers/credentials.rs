//! Okapi `eholdings/user-kb-credential` handler.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::SharedState;

/// GET /eholdings/user-kb-credential
///
/// Returns the configured credentials as a JSON:API resource, or 404 when
/// the user has none.
pub async fn get_user_kb_credential(State(state): State<SharedState>) -> Response {
    let state = state.read().await;

    let Some(credentials) = state.credentials.as_ref() else {
        return (StatusCode::NOT_FOUND, "KB credentials do not exist").into_response();
    };

    let document = serde_json::json!({
        "id": "mock-credentials",
        "type": "kbCredentials",
        "attributes": {
            "name": "Mock KB",
            "apiKey": credentials.api_key,
            "url": credentials.url,
            "customerId": credentials.customer_id,
        }
    });

    (
        [(header::CONTENT_TYPE, "application/vnd.api+json")],
        document.to_string(),
    )
        .into_response()
}
