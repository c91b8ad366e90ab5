//! Get trait for fetching single records.

use async_trait::async_trait;

use crate::client::HoldingsClient;
use crate::error::Result;

/// Fetch a single record by ID.
///
/// # Example
///
/// ```ignore
/// use holdingsiq::{HoldingsClient, PackageByIdData, PackageId, Get};
///
/// let client = HoldingsClient::from_env()?;
/// let package = PackageByIdData::get(&client, PackageId::new(19, 3964)).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this record (numeric id, `PackageId`, ...).
    type Id: Send;

    /// Fetch the record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::NotFound`](crate::HoldingsError::NotFound)
    /// if RMAPI does not know the id, or another error if the request fails.
    async fn get(client: &HoldingsClient, id: Self::Id) -> Result<Self>;
}
