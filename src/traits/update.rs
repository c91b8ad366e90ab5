//! Update trait for modifying records.

use async_trait::async_trait;

use crate::client::HoldingsClient;
use crate::error::Result;

/// Update an existing record.
///
/// RMAPI answers a successful PUT with `204 No Content`, so implementations
/// read the record back and return the fresh copy.
///
/// # Example
///
/// ```ignore
/// use holdingsiq::{HoldingsClient, VendorById, VendorPut, Proxy, Update};
///
/// let client = HoldingsClient::from_env()?;
/// let put = VendorPut {
///     proxy: Some(Proxy { id: "EZProxy".into(), inherited: None }),
///     ..Default::default()
/// };
/// let provider = VendorById::update(&client, 19, put).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this record.
    type Id: Send;

    /// Request body for the update.
    type Params: Send;

    /// Update the record and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found or the request fails.
    async fn update(client: &HoldingsClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
