//! Delete trait for removing records from holdings.

use async_trait::async_trait;

use crate::client::HoldingsClient;
use crate::error::Result;

/// Remove a record from the customer's holdings.
///
/// RMAPI has no DELETE verb for these records; deletion deselects them.
#[async_trait]
pub trait Delete {
    /// The ID type for this record.
    type Id: Send;

    /// Deselect the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found or the request fails.
    async fn delete(client: &HoldingsClient, id: Self::Id) -> Result<()>;
}
