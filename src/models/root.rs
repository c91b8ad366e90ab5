//! Account-level settings: root proxy, custom labels, proxies and holdings loads.

use serde::{Deserialize, Serialize};

use super::common::{Proxy, TransactionId};
use crate::client::HoldingsClient;
use crate::error::Result;

const ROOT_PATH: &str = "";
const PROXIES_PATH: &str = "proxies";
const HOLDINGS_PATH: &str = "holdings";
const HOLDINGS_STATUS_PATH: &str = "holdings/status";

/// The account root document: the owning vendor, the default proxy and the
/// custom labels shown in the full text and publication finders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootProxyCustomLabels {
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
    #[serde(default)]
    pub labels: Vec<CustomLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLabel {
    pub id: u32,
    #[serde(default)]
    pub display_label: String,
    #[serde(default)]
    pub display_on_full_text_finder: bool,
    #[serde(default)]
    pub display_on_publication_finder: bool,
}

/// A proxy configured for the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyWithUrl {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url_mask: String,
}

/// Progress of the last holdings snapshot load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl LoadStatus {
    pub fn is_completed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("completed"))
    }
}

impl RootProxyCustomLabels {
    #[tracing::instrument(skip(client))]
    pub async fn get(client: &HoldingsClient) -> Result<Self> {
        client.get(ROOT_PATH).await
    }

    /// Replace the root proxy and labels, then read them back.
    #[tracing::instrument(skip(client))]
    pub async fn update(client: &HoldingsClient, labels: &RootProxyCustomLabels) -> Result<Self> {
        client.put(ROOT_PATH, labels).await?;
        Self::get(client).await
    }
}

/// Make a cheap authenticated call to confirm the credentials work.
#[tracing::instrument(skip(client))]
pub async fn verify_credentials(client: &HoldingsClient) -> Result<()> {
    client.get::<serde_json::Value>(ROOT_PATH).await.map(|_| ())
}

pub async fn get_root_proxy_custom_labels(client: &HoldingsClient) -> Result<RootProxyCustomLabels> {
    RootProxyCustomLabels::get(client).await
}

pub async fn update_root_proxy_custom_labels(
    client: &HoldingsClient,
    labels: &RootProxyCustomLabels,
) -> Result<RootProxyCustomLabels> {
    RootProxyCustomLabels::update(client, labels).await
}

#[tracing::instrument(skip(client))]
pub async fn get_proxies(client: &HoldingsClient) -> Result<Vec<ProxyWithUrl>> {
    client.get(PROXIES_PATH).await
}

/// Start a holdings snapshot load.
///
/// Returns `None` when a load is already in progress.
#[tracing::instrument(skip(client))]
pub async fn populate_holdings(client: &HoldingsClient) -> Result<Option<TransactionId>> {
    client.post_empty(HOLDINGS_PATH).await
}

#[tracing::instrument(skip(client))]
pub async fn get_load_status(client: &HoldingsClient) -> Result<LoadStatus> {
    client.get(HOLDINGS_STATUS_PATH).await
}
