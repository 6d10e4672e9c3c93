//! Modular action API key stored in the credential store.
//!
//! The key lives under `<realm>:<name>:` in the add-on's app namespace.
//! Saving over an existing key deletes and recreates it, since the store
//! refuses to create an entry that already exists.

use cim_client::ClientError;
use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::CredentialStore;

/// Successful API key operations, with the status text shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyOutcome {
    Saved,
    Updated,
    Retrieved,
    Deleted,
}

impl ApiKeyOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Saved => "Successfully saved API Key!",
            Self::Updated => "Successfully updated API Key!",
            Self::Retrieved => "Successfully retrieved API Key!",
            Self::Deleted => "Successfully deleted API Key!",
        }
    }
}

/// Failed API key operations.
#[derive(Debug, Error)]
pub enum ApiKeyError {
    #[error("Failed to save API Key!")]
    SaveFailed {
        #[source]
        source: ClientError,
    },

    #[error("Failed to update API Key!")]
    UpdateFailed {
        #[source]
        source: ClientError,
    },

    /// Lookup failed, or did not return exactly one entry.
    #[error("Failed to retrieve API Key!")]
    RetrieveFailed {
        #[source]
        source: Option<ClientError>,
        found: usize,
    },

    #[error("Failed to delete API Key!")]
    DeleteFailed {
        #[source]
        source: ClientError,
    },
}

/// A key read back from the store.
#[derive(Debug, Clone)]
pub struct RetrievedKey {
    pub name: String,
    pub key: SecretString,
}

/// Saves, reads and deletes the API key in one realm.
pub struct ApiKeyManager<'a, S: ?Sized> {
    store: &'a S,
    realm: String,
}

impl<'a, S> ApiKeyManager<'a, S>
where
    S: CredentialStore + ?Sized,
{
    pub fn new(store: &'a S, realm: impl Into<String>) -> Self {
        Self {
            store,
            realm: realm.into(),
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Store `key` under `name`, replacing any existing key.
    pub async fn save(&self, name: &str, key: &SecretString) -> Result<ApiKeyOutcome, ApiKeyError> {
        match self.store.create_credential(&self.realm, name, key).await {
            Ok(()) => {
                info!(realm = %self.realm, name, "API key saved");
                Ok(ApiKeyOutcome::Saved)
            }
            Err(ClientError::Conflict(_)) => self.replace(name, key).await,
            Err(source) => {
                warn!(realm = %self.realm, name, error = %source, "API key save failed");
                Err(ApiKeyError::SaveFailed { source })
            }
        }
    }

    async fn replace(&self, name: &str, key: &SecretString) -> Result<ApiKeyOutcome, ApiKeyError> {
        debug!(realm = %self.realm, name, "API key exists, replacing");
        if let Err(e) = self.store.delete_credential(&self.realm, name).await {
            debug!(error = %e, "Delete before update failed, recreating anyway");
        }
        match self.store.create_credential(&self.realm, name, key).await {
            Ok(()) => {
                info!(realm = %self.realm, name, "API key updated");
                Ok(ApiKeyOutcome::Updated)
            }
            Err(source) => {
                warn!(realm = %self.realm, name, error = %source, "API key update failed");
                Err(ApiKeyError::UpdateFailed { source })
            }
        }
    }

    /// Read the key stored under `name`. Exactly one entry must match.
    pub async fn show(&self, name: &str) -> Result<RetrievedKey, ApiKeyError> {
        let entries = self
            .store
            .get_credential(&self.realm, name)
            .await
            .map_err(|source| {
                warn!(realm = %self.realm, name, error = %source, "API key lookup failed");
                ApiKeyError::RetrieveFailed {
                    source: Some(source),
                    found: 0,
                }
            })?;
        let found = entries.len();
        match <[_; 1]>::try_from(entries) {
            Ok([entry]) => Ok(RetrievedKey {
                name: name.to_string(),
                key: entry.clear_password,
            }),
            Err(_) => {
                warn!(realm = %self.realm, name, found, "Expected exactly one API key entry");
                Err(ApiKeyError::RetrieveFailed {
                    source: None,
                    found,
                })
            }
        }
    }

    pub async fn delete(&self, name: &str) -> Result<ApiKeyOutcome, ApiKeyError> {
        self.store
            .delete_credential(&self.realm, name)
            .await
            .map_err(|source| {
                warn!(realm = %self.realm, name, error = %source, "API key delete failed");
                ApiKeyError::DeleteFailed { source }
            })?;
        info!(realm = %self.realm, name, "API key deleted");
        Ok(ApiKeyOutcome::Deleted)
    }
}
