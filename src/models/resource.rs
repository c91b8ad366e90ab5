//! Resource operations.
//!
//! A resource is a title within a specific package, addressed by a
//! [`ResourceId`]. RMAPI returns resources in the shape of a [`Title`] whose
//! `customerResourcesList` holds the one package-specific entry.

use serde::{Deserialize, Serialize};

use super::common::{CoverageDates, EmbargoPeriod, Proxy, ResourceId, ResourceSelectedPayload};
use super::title::{Contributor, Identifier, Title};
use crate::client::HoldingsClient;
use crate::error::Result;

/// Body for updating a resource. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_coverage_list: Option<Vec<CoverageDates>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_embargo_period: Option<EmbargoPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,

    // Only accepted for custom titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_peer_reviewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers_list: Option<Vec<Identifier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors_list: Option<Vec<Contributor>>,
}

#[tracing::instrument(skip(client))]
pub async fn get_resource(client: &HoldingsClient, id: ResourceId) -> Result<Title> {
    client.get(&id.path()).await
}

/// Add a title to (or remove it from) the customer's holdings in one
/// package, then read the resource back.
#[tracing::instrument(skip(client))]
pub async fn select_resource(
    client: &HoldingsClient,
    id: ResourceId,
    payload: &ResourceSelectedPayload,
) -> Result<Title> {
    client.put(&id.path(), payload).await?;
    get_resource(client, id).await
}

#[tracing::instrument(skip(client))]
pub async fn update_resource(client: &HoldingsClient, id: ResourceId, resource: &ResourcePut) -> Result<()> {
    client.put(&id.path(), resource).await
}

/// Remove the resource from holdings by deselecting it.
#[tracing::instrument(skip(client))]
pub async fn delete_resource(client: &HoldingsClient, id: ResourceId) -> Result<()> {
    client
        .put(&id.path(), &ResourceSelectedPayload::selected(false))
        .await
}
