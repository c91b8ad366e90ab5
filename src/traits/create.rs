//! Create trait for adding custom records.

use async_trait::async_trait;

use crate::client::HoldingsClient;
use crate::error::Result;

/// Create a record under a parent and return it as RMAPI now reports it.
#[async_trait]
pub trait Create: Sized {
    /// The parent the new record is created under.
    type Parent: Send;

    /// Request body for the creation.
    type Params: Send;

    /// Create the record.
    ///
    /// # Errors
    ///
    /// Returns an error if RMAPI rejects the body or the request fails.
    async fn create(
        client: &HoldingsClient,
        parent: Self::Parent,
        params: Self::Params,
    ) -> Result<Self>;
}
