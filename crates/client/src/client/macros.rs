//! Search macro client methods.
//!
//! Responsibilities:
//! - Macro listing and definition updates with auth retry.

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::Macro;

impl SplunkClient {
    /// List macros in `owner`/`app`, optionally filtered (e.g. `name=cim_*_indexes`).
    pub async fn list_macros(
        &self,
        owner: &str,
        app: &str,
        search: Option<&str>,
    ) -> Result<Vec<Macro>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::list_macros(
                &self.http,
                &self.base_url,
                &__token,
                owner,
                app,
                search,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Replace a macro's definition.
    pub async fn update_macro_definition(
        &self,
        owner: &str,
        app: &str,
        name: &str,
        definition: &str,
    ) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            endpoints::update_macro_definition(
                &self.http,
                &self.base_url,
                &__token,
                owner,
                app,
                name,
                definition,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
