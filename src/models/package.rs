//! Package models and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::common::{CoverageDates, PackageId, Proxy, Sort, Token, VendorPutToken, VisibilityInfo};
use crate::client::{HoldingsClient, PACKAGES_PATH, VENDORS_PATH};
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::{Create, Delete, Get, List, Update};
use crate::urlbuilder::PackagesFilterableUrlBuilder;

/// A package as returned by package searches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageData {
    #[serde(default)]
    pub package_id: u64,

    #[serde(default)]
    pub package_name: String,

    /// Vendor that offers the package.
    #[serde(default)]
    pub vendor_id: u64,

    #[serde(default)]
    pub vendor_name: String,

    /// Whether the customer created this package.
    #[serde(default)]
    pub is_custom: bool,

    /// Total titles in the package.
    #[serde(default)]
    pub title_count: u32,

    /// Titles of this package in the customer's holdings.
    #[serde(default)]
    pub selected_count: u32,

    /// E.g. `EBook`, `EJournal`, `AggregatedFullText`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default)]
    pub is_selected: bool,

    #[serde(default)]
    pub is_token_needed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_ebsco_to_add_titles: Option<bool>,

    /// `Complete`, `Variable` or `Custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_coverage: Option<CoverageDates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_data: Option<VisibilityInfo>,
}

impl PackageData {
    pub fn full_id(&self) -> PackageId {
        PackageId::new(self.vendor_id, self.package_id)
    }
}

/// One page of a package search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packages {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub packages_list: Vec<PackageData>,
}

/// A single package with its proxy and token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageByIdData {
    #[serde(flatten)]
    pub package: PackageData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_token: Option<Token>,
}

impl std::ops::Deref for PackageByIdData {
    type Target = PackageData;

    fn deref(&self) -> &PackageData {
        &self.package
    }
}

/// Body for updating a package. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_ebsco_to_add_titles: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_coverage: Option<CoverageDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_token: Option<VendorPutToken>,
    /// Custom packages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Custom packages only; numeric content type code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<u32>,
}

/// Body for creating a custom package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePost {
    pub package_name: String,
    pub content_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_coverage: Option<CoverageDates>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCreated {
    pub package_id: u64,
}

/// Query parameters for searching packages.
#[derive(Debug, Clone, Default)]
pub struct PackageListQuery {
    /// Restrict to one vendor's packages.
    pub provider_id: Option<u64>,
    /// `all`, `selected`, `notselected` or `orderedthroughebsco`.
    pub filter_selected: Option<String>,
    /// Content type filter (`ebook`, `ejournal`, ...).
    pub filter_type: Option<String>,
    pub q: Option<String>,
    pub sort: Option<Sort>,
}

impl PackageListQuery {
    pub fn for_provider(provider_id: u64) -> Self {
        Self {
            provider_id: Some(provider_id),
            ..Default::default()
        }
    }
}

/// One page of a package search, as RMAPI returns it.
#[tracing::instrument(skip(client))]
pub async fn get_packages(
    client: &HoldingsClient,
    query: &PackageListQuery,
    page: u32,
    count: u32,
) -> Result<Packages> {
    let params = PackagesFilterableUrlBuilder::new()
        .filter_selected(query.filter_selected.as_deref())
        .filter_type(query.filter_type.as_deref())
        .q(query.q.as_deref())
        .page(page)
        .count(count)
        .sort(query.sort)
        .build();

    let path = match query.provider_id {
        Some(provider_id) => format!("{VENDORS_PATH}/{provider_id}/{PACKAGES_PATH}?{params}"),
        None => format!("{PACKAGES_PATH}?{params}"),
    };
    client.get(&path).await
}

/// First page of a vendor's packages with default filters.
pub async fn get_provider_packages(client: &HoldingsClient, provider_id: u64) -> Result<Packages> {
    get_packages(
        client,
        &PackageListQuery::for_provider(provider_id),
        1,
        25,
    )
    .await
}

#[async_trait]
impl List for PackageData {
    type Query = PackageListQuery;

    async fn list_page(
        client: &HoldingsClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let data = get_packages(client, query, page, count).await?;
        Ok(Page::new(data.packages_list, page, count, data.total_results))
    }
}

#[async_trait]
impl Get for PackageByIdData {
    type Id = PackageId;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HoldingsClient, id: PackageId) -> Result<Self> {
        client.get(&id.path()).await
    }
}

#[async_trait]
impl Update for PackageByIdData {
    type Id = PackageId;
    type Params = PackagePut;

    #[tracing::instrument(skip(client))]
    async fn update(client: &HoldingsClient, id: PackageId, params: PackagePut) -> Result<Self> {
        client.put(&id.path(), &params).await?;
        Self::get(client, id).await
    }
}

#[async_trait]
impl Delete for PackageByIdData {
    type Id = PackageId;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HoldingsClient, id: PackageId) -> Result<()> {
        let deselect = PackagePut {
            is_selected: Some(false),
            ..Default::default()
        };
        client.put(&id.path(), &deselect).await
    }
}

#[async_trait]
impl Create for PackageByIdData {
    /// Vendor id.
    type Parent = u64;
    type Params = PackagePost;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HoldingsClient, provider_id: u64, params: PackagePost) -> Result<Self> {
        let created: PackageCreated = client
            .post(&format!("{VENDORS_PATH}/{provider_id}/{PACKAGES_PATH}"), &params)
            .await?;
        Self::get(client, PackageId::new(provider_id, created.package_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_by_id_flattens_package_fields() {
        let json = r#"{
            "packageId": 3964,
            "packageName": "Academic Search Complete",
            "vendorId": 19,
            "vendorName": "EBSCO",
            "titleCount": 12000,
            "selectedCount": 100,
            "contentType": "AggregatedFullText",
            "isSelected": true,
            "proxy": {"id": "<n>", "inherited": true},
            "packageToken": null
        }"#;

        let package: PackageByIdData = serde_json::from_str(json).unwrap();
        assert_eq!(package.full_id(), PackageId::new(19, 3964));
        assert_eq!(package.package_name, "Academic Search Complete");
        assert!(package.is_selected);
        assert_eq!(package.proxy.as_ref().unwrap().inherited, Some(true));
        assert!(package.package_token.is_none());
    }

    #[test]
    fn test_deselect_body() {
        let put = PackagePut {
            is_selected: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&put).unwrap(),
            serde_json::json!({ "isSelected": false })
        );
    }

    #[test]
    fn test_package_post_body() {
        let post = PackagePost {
            package_name: "My package".into(),
            content_type: 1,
            custom_coverage: Some(CoverageDates::new("2003-01-01", "2004-01-01")),
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            serde_json::json!({
                "packageName": "My package",
                "contentType": 1,
                "customCoverage": {"beginCoverage": "2003-01-01", "endCoverage": "2004-01-01"}
            })
        );
    }
}
