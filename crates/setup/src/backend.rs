//! Seams between the setup flow and Splunk.
//!
//! [`SetupBackend`] covers everything the setup session reads and writes;
//! [`CredentialStore`] covers the stored API key. [`SplunkBackend`]
//! implements both over a [`SplunkClient`] scoped to one [`SetupTarget`].
//! Tests substitute in-memory implementations.

use async_trait::async_trait;
use cim_client::{ClientError, DataModelConfig, Index, Macro, SplunkClient, StoredPassword, Tag};
use cim_config::SetupTarget;
use secrecy::SecretString;
use tracing::debug;

use crate::whitelist::MACRO_SEARCH_FILTER;

type ClientResult<T> = std::result::Result<T, ClientError>;

/// Reads and writes performed by a setup session.
#[async_trait]
pub trait SetupBackend: Send + Sync {
    /// Whether the current user holds `capability`.
    async fn has_capability(&self, capability: &str) -> ClientResult<bool>;

    /// Server version string, e.g. `9.1.2`.
    async fn server_version(&self) -> ClientResult<String>;

    /// Macros named `cim_*_indexes`.
    async fn list_index_macros(&self) -> ClientResult<Vec<Macro>>;

    async fn list_indexes(&self) -> ClientResult<Vec<Index>>;

    async fn list_datamodels(&self) -> ClientResult<Vec<DataModelConfig>>;

    async fn list_tags(&self) -> ClientResult<Vec<Tag>>;

    /// Replace a macro's definition.
    async fn update_macro(&self, name: &str, definition: &str) -> ClientResult<()>;

    /// Post attribute updates for one data model.
    async fn update_datamodel(&self, name: &str, params: &[(String, String)]) -> ClientResult<()>;
}

/// Credential storage used by the API key manager.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_credential(
        &self,
        realm: &str,
        name: &str,
        secret: &SecretString,
    ) -> ClientResult<()>;

    async fn get_credential(&self, realm: &str, name: &str) -> ClientResult<Vec<StoredPassword>>;

    async fn delete_credential(&self, realm: &str, name: &str) -> ClientResult<()>;
}

/// Splunk-backed implementation of both seams.
#[derive(Debug)]
pub struct SplunkBackend {
    client: SplunkClient,
    target: SetupTarget,
}

impl SplunkBackend {
    pub fn new(client: SplunkClient, target: SetupTarget) -> Self {
        Self { client, target }
    }

    pub fn target(&self) -> &SetupTarget {
        &self.target
    }
}

#[async_trait]
impl SetupBackend for SplunkBackend {
    async fn has_capability(&self, capability: &str) -> ClientResult<bool> {
        let context = self.client.current_context().await?;
        debug!(user = %context.username, capability, "Checking capability");
        Ok(context.has_capability(capability))
    }

    async fn server_version(&self) -> ClientResult<String> {
        Ok(self.client.server_info().await?.version)
    }

    async fn list_index_macros(&self) -> ClientResult<Vec<Macro>> {
        self.client
            .list_macros(&self.target.owner, &self.target.app, Some(MACRO_SEARCH_FILTER))
            .await
    }

    async fn list_indexes(&self) -> ClientResult<Vec<Index>> {
        self.client.list_indexes().await
    }

    async fn list_datamodels(&self) -> ClientResult<Vec<DataModelConfig>> {
        self.client
            .list_datamodel_configs(&self.target.owner, &self.target.app)
            .await
    }

    async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        self.client.list_tags().await
    }

    async fn update_macro(&self, name: &str, definition: &str) -> ClientResult<()> {
        self.client
            .update_macro_definition(&self.target.owner, &self.target.app, name, definition)
            .await
    }

    async fn update_datamodel(&self, name: &str, params: &[(String, String)]) -> ClientResult<()> {
        self.client
            .update_datamodel_config(&self.target.owner, &self.target.app, name, params)
            .await
    }
}

#[async_trait]
impl CredentialStore for SplunkBackend {
    async fn create_credential(
        &self,
        realm: &str,
        name: &str,
        secret: &SecretString,
    ) -> ClientResult<()> {
        self.client
            .create_password(&self.target.app, realm, name, secret)
            .await
    }

    async fn get_credential(&self, realm: &str, name: &str) -> ClientResult<Vec<StoredPassword>> {
        self.client.get_password(&self.target.app, realm, name).await
    }

    async fn delete_credential(&self, realm: &str, name: &str) -> ClientResult<()> {
        self.client.delete_password(&self.target.app, realm, name).await
    }
}
