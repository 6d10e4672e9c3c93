//! Stored credential client methods.

use secrecy::{ExposeSecret, SecretString};

use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::StoredPassword;

impl SplunkClient {
    /// Create the credential `realm:name:` in `app`.
    pub async fn create_password(
        &self,
        app: &str,
        realm: &str,
        name: &str,
        password: &SecretString,
    ) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            endpoints::create_password(
                &self.http,
                &self.base_url,
                &__token,
                app,
                realm,
                name,
                password.expose_secret(),
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Fetch the entries stored under `realm:name:` in `app`.
    pub async fn get_password(
        &self,
        app: &str,
        realm: &str,
        name: &str,
    ) -> Result<Vec<StoredPassword>> {
        crate::retry_call!(
            self,
            __token,
            endpoints::get_password(
                &self.http,
                &self.base_url,
                &__token,
                app,
                realm,
                name,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Delete the credential `realm:name:` in `app`.
    pub async fn delete_password(&self, app: &str, realm: &str, name: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            endpoints::delete_password(
                &self.http,
                &self.base_url,
                &__token,
                app,
                realm,
                name,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
