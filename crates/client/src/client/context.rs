//! Capability context client methods.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::CurrentContext;

impl SplunkClient {
    /// Fetch the caller's identity and capabilities.
    pub async fn current_context(&self) -> Result<CurrentContext> {
        crate::retry_call!(
            self,
            __token,
            endpoints::get_current_context(
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
