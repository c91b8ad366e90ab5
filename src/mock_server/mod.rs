//! Mock RMAPI server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates RMAPI and the
//! Okapi `eholdings/user-kb-credential` endpoint for integration and
//! end-to-end testing. Unlike wiremock which mocks at the HTTP level
//! per-test, this server maintains state across requests, so selecting a
//! package and then reading it back behaves like the real service.
//!
//! # Example
//!
//! ```ignore
//! use holdingsiq::mock_server::{MockServer, MOCK_API_KEY, MOCK_CUSTOMER_ID};
//! use holdingsiq::{HoldingsClient, VendorById, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = HoldingsClient::new(MOCK_CUSTOMER_ID, MOCK_API_KEY, server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let vendor = VendorById::get(&client, 19).await.unwrap();
//!     assert_eq!(vendor.vendor_name, "EBSCO");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::{router, MockServer, MOCK_API_KEY, MOCK_CUSTOMER_ID};
pub use state::MockState;
