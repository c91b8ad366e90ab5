//! List trait for fetching collections of records.

use async_trait::async_trait;

use crate::client::HoldingsClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for [`List::list_all`]. RMAPI caps `count` at 100.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List records with pagination.
///
/// # Example
///
/// ```ignore
/// use holdingsiq::{HoldingsClient, Vendor, VendorListQuery, List};
///
/// let client = HoldingsClient::from_env()?;
///
/// // A single page
/// let page = Vendor::list_page(&client, &VendorListQuery::default(), 1, 25).await?;
///
/// // Every page
/// let all = Vendor::list_all(&client, &VendorListQuery::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Search and filter parameters.
    type Query: Default + Send + Sync;

    /// List records matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The RMAPI client
    /// * `query` - Search and filter parameters
    /// * `page` - Page number (1-indexed, sent as `offset`)
    /// * `count` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &HoldingsClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>>;

    /// List every record matching the query, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &HoldingsClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more;
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
