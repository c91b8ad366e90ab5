//! Mock RMAPI server.
//!
//! Provides an axum-based HTTP server that simulates RMAPI and the Okapi
//! credentials endpoint.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// Customer id the default scenario is served under.
pub const MOCK_CUSTOMER_ID: &str = "mockcustomer";
/// API key the default scenario requires.
pub const MOCK_API_KEY: &str = "mock-api-key";

const ACCOUNT_ROOT: &str = "/rm/rmaccounts/:customer_id";

/// A mock RMAPI server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Requests must use [`MOCK_API_KEY`]; the credentials endpoint hands out
    /// [`MOCK_CUSTOMER_ID`] and that key, pointing back at this server.
    pub async fn start() -> Self {
        let server = Self::with_state(Self::default_state()).await;
        server.state.write().await.credentials = Some(Fixtures::credentials(
            MOCK_CUSTOMER_ID,
            MOCK_API_KEY,
            &server.url,
        ));
        server
    }

    /// Start a mock server with empty state and no API key check.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock server error: {e}");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the RMAPI url, or as `X-Okapi-Url` for the
    /// credentials endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_required_api_key(MOCK_API_KEY);

        for vendor in scenario.vendors {
            state = state.with_vendor(vendor);
        }
        for package in scenario.packages {
            state = state.with_package(package);
        }
        for title in scenario.titles {
            state = state.with_title(title);
        }
        state.root = scenario.root;
        state.proxies = scenario.proxies;
        state.load_status = scenario.load_status;

        state
    }
}

/// Build the axum router with all routes.
pub fn router(state: Arc<RwLock<MockState>>) -> Router {
    let account = |path: &str| format!("{ACCOUNT_ROOT}{path}");

    let rmapi = Router::new()
        // Account routes
        .route(
            &account("/"),
            get(handlers::get_root).put(handlers::update_root),
        )
        .route(&account("/proxies"), get(handlers::get_proxies))
        .route(&account("/holdings"), post(handlers::populate_holdings))
        .route(&account("/holdings/status"), get(handlers::get_load_status))
        // Vendor routes
        .route(&account("/vendors"), get(handlers::list_vendors))
        .route(
            &account("/vendors/:vendor_id"),
            get(handlers::get_vendor).put(handlers::update_vendor),
        )
        // Package routes
        .route(&account("/packages"), get(handlers::list_packages))
        .route(
            &account("/vendors/:vendor_id/packages"),
            get(handlers::list_vendor_packages).post(handlers::create_package),
        )
        .route(
            &account("/vendors/:vendor_id/packages/:package_id"),
            get(handlers::get_package).put(handlers::update_package),
        )
        // Title and resource routes
        .route(&account("/titles"), get(handlers::list_titles))
        .route(&account("/titles/:title_id"), get(handlers::get_title))
        .route(
            &account("/vendors/:vendor_id/packages/:package_id/titles"),
            get(handlers::list_package_titles).post(handlers::create_title),
        )
        .route(
            &account("/vendors/:vendor_id/packages/:package_id/titles/:title_id"),
            get(handlers::get_resource).put(handlers::update_resource),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::require_api_key,
        ));

    Router::new()
        .merge(rmapi)
        .route(
            "/eholdings/user-kb-credential",
            get(handlers::get_user_kb_credential),
        )
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
