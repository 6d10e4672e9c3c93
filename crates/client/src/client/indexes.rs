//! Index client methods.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::Index;

impl SplunkClient {
    /// List every index visible to the caller.
    pub async fn list_indexes(&self) -> Result<Vec<Index>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_indexes(
                &self.http,
                &self.base_url,
                &__token,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
