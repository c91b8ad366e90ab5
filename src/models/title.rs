//! Title models and trait implementations.
//!
//! A title is a publication; its `customerResourcesList` holds one entry per
//! package the title appears in (a resource).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::common::{CoverageDates, EmbargoPeriod, FilterQuery, PackageId, Proxy, Sort, VisibilityInfo};
use crate::client::{HoldingsClient, TITLES_PATH};
use crate::error::Result;
use crate::pagination::{more_pages, Page};
use crate::traits::{Create, Get, List};
use crate::urlbuilder::TitlesFilterableUrlBuilder;

/// A title with the resources it has in the customer's packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    #[serde(default)]
    pub title_id: u64,

    #[serde(default)]
    pub title_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_name: Option<String>,

    /// E.g. `Book`, `Journal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<String>,

    #[serde(default)]
    pub is_title_custom: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_peer_reviewed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub identifiers_list: Vec<Identifier>,

    #[serde(default)]
    pub subjects_list: Vec<Subject>,

    #[serde(default)]
    pub contributors_list: Vec<Contributor>,

    /// `None` when RMAPI sent `null`; such titles are dropped from lists.
    #[serde(default)]
    pub customer_resources_list: Option<Vec<CustomerResources>>,
}

impl Title {
    /// Resources of this title, empty when RMAPI sent none.
    pub fn resources(&self) -> &[CustomerResources] {
        self.customer_resources_list.as_deref().unwrap_or_default()
    }

    /// True when the title is in at least one of the customer's packages.
    pub fn has_resources(&self) -> bool {
        !self.resources().is_empty()
    }
}

/// A title's presence in one package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResources {
    #[serde(default)]
    pub title_id: u64,
    #[serde(default)]
    pub package_id: u64,
    #[serde(default)]
    pub package_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(default)]
    pub is_package_custom: bool,
    #[serde(default)]
    pub vendor_id: u64,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub is_token_needed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_statement: Option<String>,
    #[serde(default)]
    pub managed_coverage_list: Vec<CoverageDates>,
    #[serde(default)]
    pub custom_coverage_list: Vec<CoverageDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_embargo_period: Option<EmbargoPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_embargo_period: Option<EmbargoPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_data: Option<VisibilityInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
}

/// ISSN/ISBN style identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// RMAPI code: 0 ISSN, 1 ISBN, ...
    #[serde(rename = "type", default)]
    pub identifier_type: i32,
    /// RMAPI code: 1 print, 2 online, ...
    #[serde(default)]
    pub subtype: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default)]
    pub subject: String,
    #[serde(rename = "type", default)]
    pub subject_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    #[serde(rename = "type", default)]
    pub contributor_type: String,
    #[serde(default)]
    pub contributor: String,
}

/// One page of a title search.
///
/// Entries can be `null` in raw RMAPI output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Titles {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(rename = "titles", default)]
    pub title_list: Vec<Option<Title>>,
}

impl Titles {
    /// Drop `null` titles and titles without resources, lowering
    /// `total_results` by the number dropped (0 if RMAPI sent no total).
    #[must_use]
    pub fn without_invalid(mut self) -> Self {
        let initial = self.title_list.len();
        self.title_list
            .retain(|title| title.as_ref().is_some_and(Title::has_resources));
        let removed = (initial - self.title_list.len()) as u64;

        Self {
            total_results: Some(
                self.total_results
                    .map_or(0, |total| total.saturating_sub(removed)),
            ),
            title_list: self.title_list,
        }
    }

    /// The titles, skipping any `null` entries.
    pub fn into_titles(self) -> Vec<Title> {
        self.title_list.into_iter().flatten().collect()
    }
}

/// Body for creating a custom title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitlePost {
    pub title_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_peer_reviewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers_list: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors_list: Vec<Contributor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleCreated {
    pub title_id: u64,
}

/// Query parameters for searching titles.
#[derive(Debug, Clone, Default)]
pub struct TitleListQuery {
    /// Search within one package instead of the whole knowledge base.
    pub package: Option<PackageId>,
    pub filter: FilterQuery,
    /// Defaults to `advanced`.
    pub search_type: Option<String>,
    pub sort: Option<Sort>,
}

/// One page of a title search with invalid titles removed.
#[tracing::instrument(skip(client))]
pub async fn get_titles(
    client: &HoldingsClient,
    query: &TitleListQuery,
    page: u32,
    count: u32,
) -> Result<Titles> {
    fetch_titles(client, &titles_path(query, page, count)).await
}

fn titles_path(query: &TitleListQuery, page: u32, count: u32) -> String {
    let params = TitlesFilterableUrlBuilder::new()
        .filter(&query.filter)
        .search_type(query.search_type.as_deref())
        .sort(query.sort)
        .page(page)
        .count(count)
        .build();

    match &query.package {
        Some(package) => format!("{}/{TITLES_PATH}?{params}", package.path()),
        None => format!("{TITLES_PATH}?{params}"),
    }
}

/// Title search with a caller-built RMAPI query string.
#[tracing::instrument(skip(client))]
pub async fn get_titles_by_query(client: &HoldingsClient, rmapi_query: &str) -> Result<Titles> {
    fetch_titles(client, &format!("{TITLES_PATH}?{rmapi_query}")).await
}

async fn fetch_titles(client: &HoldingsClient, path: &str) -> Result<Titles> {
    let titles: Titles = client.get(path).await?;
    Ok(titles.without_invalid())
}

#[async_trait]
impl Get for Title {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HoldingsClient, id: u64) -> Result<Self> {
        client.get(&format!("{TITLES_PATH}/{id}")).await
    }
}

#[async_trait]
impl List for Title {
    type Query = TitleListQuery;

    async fn list_page(
        client: &HoldingsClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let raw: Titles = client.get(&titles_path(query, page, count)).await?;
        // Paging follows RMAPI's own total, not the one lowered by filtering.
        let has_more = more_pages(page, count, raw.total_results, raw.title_list.len());
        let titles = raw.without_invalid();
        let total = titles.total_results;
        Ok(Page::with_has_more(titles.into_titles(), page, count, total, has_more))
    }
}

#[async_trait]
impl Create for Title {
    type Parent = PackageId;
    type Params = TitlePost;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HoldingsClient, package: PackageId, params: TitlePost) -> Result<Self> {
        let created: TitleCreated = client
            .post(&format!("{}/{TITLES_PATH}", package.path()), &params)
            .await?;
        Self::get(client, created.title_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(id: u64, resources: Option<usize>) -> Title {
        Title {
            title_id: id,
            customer_resources_list: resources.map(|n| {
                (0..n)
                    .map(|_| CustomerResources {
                        title_id: id,
                        ..Default::default()
                    })
                    .collect()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_without_invalid_removes_empty_and_null() {
        let titles = Titles {
            total_results: Some(10),
            title_list: vec![
                Some(title(1, Some(1))),
                None,
                Some(title(2, Some(0))),
                Some(title(3, None)),
                Some(title(4, Some(2))),
            ],
        };

        let cleaned = titles.without_invalid();
        assert_eq!(cleaned.total_results, Some(7));
        let ids: Vec<u64> = cleaned.into_titles().iter().map(|t| t.title_id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_without_invalid_missing_total_is_zero() {
        let titles = Titles {
            total_results: None,
            title_list: vec![Some(title(1, Some(1)))],
        };
        assert_eq!(titles.without_invalid().total_results, Some(0));
    }

    #[test]
    fn test_titles_deserialize_with_null_entries() {
        let json = r#"{
            "totalResults": 2,
            "titles": [
                null,
                {
                    "titleId": 1,
                    "titleName": "Test Title",
                    "identifiersList": [{"id": "1362-3613", "source": "ResourceIdentifier", "type": 0, "subtype": 1}],
                    "subjectsList": [{"subject": "History", "type": "TLI"}],
                    "customerResourcesList": [{"titleId": 1, "packageId": 3964, "vendorId": 19, "isSelected": true}]
                }
            ]
        }"#;

        let titles: Titles = serde_json::from_str(json).unwrap();
        assert_eq!(titles.title_list.len(), 2);

        let cleaned = titles.without_invalid();
        assert_eq!(cleaned.total_results, Some(1));
        let only = &cleaned.title_list[0].as_ref().unwrap();
        assert_eq!(only.identifiers_list[0].id, "1362-3613");
        assert!(only.resources()[0].is_selected);
    }
}
