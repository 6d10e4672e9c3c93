//! Server info client methods.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::ServerInfo;

impl SplunkClient {
    /// Fetch server info (version and build).
    pub async fn server_info(&self) -> Result<ServerInfo> {
        crate::retry_call!(
            self,
            __token,
            endpoints::get_server_info(
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
