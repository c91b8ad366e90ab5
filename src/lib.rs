//! HoldingsIQ (RMAPI) client library for FOLIO tenants.
//!
//! Resolves a tenant user's knowledge base credentials through the Okapi
//! gateway, caches and verifies them, and talks to RMAPI with a trait-based
//! API where each operation (Get, List, Update, Create, Delete) is a trait
//! that record types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use holdingsiq::{HoldingsClient, PackageByIdData, PackageId, Vendor, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> holdingsiq::Result<()> {
//!     // Create client from environment variables
//!     let client = HoldingsClient::from_env()?;
//!
//!     // Get a package by its composite id
//!     let package = PackageByIdData::get(&client, "19-3964".parse()?).await?;
//!     println!("Package: {}", package.package_name);
//!
//!     // Search vendors
//!     let vendors = Vendor::list_page(&client, &Default::default(), 1, 25).await?;
//!     println!("Found {:?} vendors", vendors.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Tenant credentials
//!
//! Inside a FOLIO module the credentials come from the requesting user:
//!
//! ```no_run
//! use std::sync::Arc;
//! use holdingsiq::{
//!     CachedConfigurationService, ConfigurationService, HoldingsClient, KbCredentialsService,
//!     OkapiData, TtlCache,
//! };
//!
//! # async fn example(headers: Vec<(String, String)>) -> holdingsiq::Result<()> {
//! let service = CachedConfigurationService::new(
//!     KbCredentialsService::new()?,
//!     Arc::new(TtlCache::default()),
//! );
//!
//! let okapi = OkapiData::new(headers)?;
//! let config = service.retrieve_configuration(&okapi).await?;
//! let client = HoldingsClient::from_configuration(&config)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`HoldingsClient::from_env`] reads:
//!
//! - `RMAPI_CUSTOMER_ID` (required) - RMAPI customer id
//! - `RMAPI_API_KEY` (required) - RMAPI API key
//! - `RMAPI_URL` (optional) - Base URL (defaults to `https://sandbox.ebsco.io`)

mod cache;
mod client;
mod config;
mod error;
mod listener;
mod models;
mod okapi;
mod pagination;
mod traits;
mod urlbuilder;
mod validator;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use cache::{TtlCache, DEFAULT_TTL};
pub use client::HoldingsClient;
pub use config::{
    CachedConfigurationService, Configuration, ConfigurationError, ConfigurationService,
    KbCredentialsService,
};
pub use error::{HoldingsError, Result};
pub use listener::{InteractionContext, ResponseBodyListener, SuccessBodyLogger};
pub use okapi::OkapiData;
pub use pagination::Page;

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

// Re-export query builders and validators
pub use urlbuilder::{PackagesFilterableUrlBuilder, QueryableUrlBuilder, TitlesFilterableUrlBuilder};
pub use validator::{PackageParametersValidator, TitleParametersValidator};

// Re-export models
pub use models::{
    // Shared types
    CoverageDates,
    EmbargoPeriod,
    FilterQuery,
    PackageId,
    Proxy,
    ResourceId,
    ResourceSelectedPayload,
    Sort,
    Token,
    TransactionId,
    VendorPutToken,
    VisibilityInfo,
    // Vendor types
    Vendor,
    VendorById,
    VendorListQuery,
    VendorPut,
    Vendors,
    // Package types
    PackageByIdData,
    PackageCreated,
    PackageData,
    PackageListQuery,
    PackagePost,
    PackagePut,
    Packages,
    // Title types
    Contributor,
    CustomerResources,
    Identifier,
    Subject,
    Title,
    TitleCreated,
    TitleListQuery,
    TitlePost,
    Titles,
    // Resource types
    ResourcePut,
    // Account types
    CustomLabel,
    LoadStatus,
    ProxyWithUrl,
    RootProxyCustomLabels,
};

// Re-export convenience functions
pub use models::{get_packages, get_provider_packages};
pub use models::{get_resource, select_resource, update_resource, delete_resource};
pub use models::{
    get_load_status, get_proxies, get_root_proxy_custom_labels, populate_holdings,
    update_root_proxy_custom_labels, verify_credentials,
};
pub use models::{get_titles, get_titles_by_query};
pub use models::{get_vendor_id, get_vendors};
