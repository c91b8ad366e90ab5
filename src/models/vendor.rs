//! Vendor (provider) models and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::common::{Proxy, Sort, Token, VendorPutToken};
use super::root::RootProxyCustomLabels;
use crate::client::{HoldingsClient, VENDORS_PATH};
use crate::error::{HoldingsError, Result};
use crate::pagination::Page;
use crate::traits::{Get, List, Update};
use crate::urlbuilder::{QueryableUrlBuilder, VENDOR_NAME_PARAMETER};

/// A vendor as returned by the vendor search.
///
/// RMAPI calls these vendors; FOLIO presents them as providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Numeric vendor id.
    #[serde(default)]
    pub vendor_id: u64,

    /// Display name.
    #[serde(default)]
    pub vendor_name: String,

    /// Number of packages the vendor offers.
    #[serde(default)]
    pub packages_total: u32,

    /// Number of those packages the customer has selected.
    #[serde(default)]
    pub packages_selected: u32,

    /// Whether the vendor is the customer's own (custom) vendor.
    #[serde(default)]
    pub is_customer: bool,

    /// Token definition, when the vendor uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_token: Option<Token>,
}

/// One page of the vendor search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendors {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}

/// A single vendor with its proxy setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorById {
    #[serde(default)]
    pub vendor_id: u64,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub packages_total: u32,
    #[serde(default)]
    pub packages_selected: u32,
    #[serde(default)]
    pub is_customer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_token: Option<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
}

impl VendorById {
    /// Id of the proxy in effect for this vendor.
    pub fn proxy_id(&self) -> Option<&str> {
        self.proxy.as_ref().and_then(|p| p.id.as_deref())
    }
}

/// Body for updating a vendor's token or proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_token: Option<VendorPutToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
}

/// Query parameters for searching vendors.
#[derive(Debug, Clone, Default)]
pub struct VendorListQuery {
    /// Search term matched against vendor names.
    pub q: Option<String>,

    /// Sort order (`relevance` needs a search term).
    pub sort: Option<Sort>,
}

#[async_trait]
impl Get for VendorById {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HoldingsClient, id: u64) -> Result<Self> {
        client.get(&format!("{VENDORS_PATH}/{id}")).await
    }
}

#[async_trait]
impl Update for VendorById {
    type Id = u64;
    type Params = VendorPut;

    #[tracing::instrument(skip(client))]
    async fn update(client: &HoldingsClient, id: u64, params: VendorPut) -> Result<Self> {
        client.put(&format!("{VENDORS_PATH}/{id}"), &params).await?;
        Self::get(client, id).await
    }
}

#[async_trait]
impl List for Vendor {
    type Query = VendorListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HoldingsClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let data = get_vendors(client, query, page, count).await?;
        Ok(Page::new(data.vendors, page, count, data.total_results))
    }
}

/// One page of the vendor search, as RMAPI returns it.
pub async fn get_vendors(
    client: &HoldingsClient,
    query: &VendorListQuery,
    page: u32,
    count: u32,
) -> Result<Vendors> {
    let params = QueryableUrlBuilder::new()
        .q(query.q.as_deref())
        .page(page)
        .count(count)
        .sort(query.sort)
        .name_parameter(VENDOR_NAME_PARAMETER)
        .build();

    client.get(&format!("{VENDORS_PATH}?{params}")).await
}

/// Id of the vendor that owns the customer's custom packages.
#[tracing::instrument(skip(client))]
pub async fn get_vendor_id(client: &HoldingsClient) -> Result<u64> {
    let labels = RootProxyCustomLabels::get(client).await?;
    labels
        .vendor_id
        .trim()
        .parse()
        .map_err(|_| HoldingsError::ServiceResponse {
            message: format!("Invalid vendor id '{}' in root proxy", labels.vendor_id),
            status_code: 200,
            status_message: "OK".to_string(),
            body: labels.vendor_id.clone(),
            query: client.construct_url(""),
        })
}
