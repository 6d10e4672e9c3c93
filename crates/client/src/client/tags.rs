//! Tag client methods.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::Tag;

impl SplunkClient {
    /// List every search-time tag.
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_tags(
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
