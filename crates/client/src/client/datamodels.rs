//! Data model configuration client methods.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::DataModelConfig;

impl SplunkClient {
    /// List data model configurations in `owner`/`app`.
    pub async fn list_datamodel_configs(
        &self,
        owner: &str,
        app: &str,
    ) -> Result<Vec<DataModelConfig>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_datamodel_configs(
                &self.http,
                &self.base_url,
                &__token,
                owner,
                app,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Post attribute updates for one data model.
    pub async fn update_datamodel_config(
        &self,
        owner: &str,
        app: &str,
        name: &str,
        params: &[(String, String)],
    ) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            endpoints::update_datamodel_config(
                &self.http,
                &self.base_url,
                &__token,
                owner,
                app,
                name,
                params,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
