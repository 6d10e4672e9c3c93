//! Shared in-memory backends for setup integration tests.
//!
//! # Invariants
//! - Every write is recorded in call order so tests can assert on requests.
//! - Failures are injected per item name.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use cim_client::{ClientError, DataModelConfig, Index, Macro, StoredPassword, Tag};
use cim_setup::{CredentialStore, SetupBackend};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

type ClientResult<T> = Result<T, ClientError>;

pub fn api_error(status: u16) -> ClientError {
    ClientError::ApiError {
        status,
        url: "https://localhost:8089/mock".to_string(),
        message: "mock failure".to_string(),
        request_id: None,
    }
}

pub fn index_macro(name: &str, definition: &str) -> Macro {
    Macro {
        name: name.to_string(),
        definition: definition.to_string(),
        ..Macro::default()
    }
}

pub fn datamodel(name: &str, content: Value) -> DataModelConfig {
    DataModelConfig {
        name: name.to_string(),
        content: match content {
            Value::Object(map) => map,
            other => panic!("datamodel content must be an object, got {other}"),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Macro { name: String, definition: String },
    DataModel { name: String, params: Vec<(String, String)> },
}

/// In-memory stand-in for Splunk.
#[derive(Default)]
pub struct MockBackend {
    pub capable: bool,
    pub capability_error: bool,
    pub version: Option<String>,
    pub macros: Vec<Macro>,
    pub indexes: Vec<String>,
    pub datamodels: Vec<DataModelConfig>,
    pub tags: Vec<String>,
    pub fail_fetch: bool,
    pub fail_writes: HashSet<String>,
    pub writes: Mutex<Vec<Write>>,
}

impl MockBackend {
    /// Two data models, three whitelist macros (one orphaned), Splunk 9.1.
    pub fn standard() -> Self {
        Self {
            capable: true,
            version: Some("9.1.2".to_string()),
            macros: vec![
                index_macro("cim_Authentication_indexes", "(index=main OR index=security)"),
                index_macro("cim_Retired_indexes", "(index=old)"),
                index_macro("cim_Network_Traffic_indexes", "()"),
            ],
            indexes: vec!["main".into(), "security".into(), "main".into(), "netfw".into()],
            datamodels: vec![
                datamodel(
                    "Network_Traffic",
                    serde_json::json!({
                        "acceleration": "0",
                        "acceleration.earliest_time": "",
                        "eai:appName": "Splunk_SA_CIM",
                        "eai:userName": "nobody",
                    }),
                ),
                datamodel(
                    "Authentication",
                    serde_json::json!({
                        "acceleration": "1",
                        "acceleration.earliest_time": "-1y",
                        "acceleration.backfill_time": "-7d",
                        "acceleration.max_time": "3600",
                        "acceleration.max_concurrent": "3",
                        "acceleration.manual_rebuilds": "false",
                        "acceleration.schedule_priority": "default",
                        "tags_whitelist": "",
                        "eai:appName": "Splunk_SA_CIM",
                        "eai:userName": "nobody",
                    }),
                ),
            ],
            tags: vec!["authentication".into(), "network".into(), "authentication".into()],
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    fn record(&self, write: Write, key: &str) -> ClientResult<()> {
        self.writes.lock().unwrap().push(write);
        if self.fail_writes.contains(key) {
            Err(api_error(500))
        } else {
            Ok(())
        }
    }

    fn fetch<T: Clone>(&self, items: &[T]) -> ClientResult<Vec<T>> {
        if self.fail_fetch {
            Err(api_error(503))
        } else {
            Ok(items.to_vec())
        }
    }
}

#[async_trait]
impl SetupBackend for MockBackend {
    async fn has_capability(&self, _capability: &str) -> ClientResult<bool> {
        if self.capability_error {
            return Err(api_error(500));
        }
        Ok(self.capable)
    }

    async fn server_version(&self) -> ClientResult<String> {
        self.version
            .clone()
            .ok_or_else(|| ClientError::NotFound("server info".to_string()))
    }

    async fn list_index_macros(&self) -> ClientResult<Vec<Macro>> {
        self.fetch(&self.macros)
    }

    async fn list_indexes(&self) -> ClientResult<Vec<Index>> {
        let indexes: Vec<Index> = self
            .indexes
            .iter()
            .map(|name| Index {
                name: name.clone(),
                ..Index::default()
            })
            .collect();
        self.fetch(&indexes)
    }

    async fn list_datamodels(&self) -> ClientResult<Vec<DataModelConfig>> {
        self.fetch(&self.datamodels)
    }

    async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        let tags: Vec<Tag> = self.tags.iter().map(|name| Tag { name: name.clone() }).collect();
        self.fetch(&tags)
    }

    async fn update_macro(&self, name: &str, definition: &str) -> ClientResult<()> {
        self.record(
            Write::Macro {
                name: name.to_string(),
                definition: definition.to_string(),
            },
            name,
        )
    }

    async fn update_datamodel(&self, name: &str, params: &[(String, String)]) -> ClientResult<()> {
        self.record(
            Write::DataModel {
                name: name.to_string(),
                params: params.to_vec(),
            },
            name,
        )
    }
}

/// In-memory credential store keyed by `realm:name:`.
#[derive(Default)]
pub struct MockCredentials {
    pub entries: Mutex<HashMap<String, String>>,
    pub fail_create: bool,
    pub fail_delete: bool,
    pub duplicate_on_get: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockCredentials {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn key(realm: &str, name: &str) -> String {
        format!("{realm}:{name}:")
    }
}

#[async_trait]
impl CredentialStore for MockCredentials {
    async fn create_credential(
        &self,
        realm: &str,
        name: &str,
        secret: &SecretString,
    ) -> ClientResult<()> {
        self.calls.lock().unwrap().push("create".to_string());
        if self.fail_create {
            return Err(api_error(500));
        }
        let mut entries = self.entries.lock().unwrap();
        let key = Self::key(realm, name);
        if entries.contains_key(&key) {
            return Err(ClientError::Conflict(key));
        }
        entries.insert(key, secret.expose_secret().to_string());
        Ok(())
    }

    async fn get_credential(&self, realm: &str, name: &str) -> ClientResult<Vec<StoredPassword>> {
        self.calls.lock().unwrap().push("get".to_string());
        let entries = self.entries.lock().unwrap();
        let key = Self::key(realm, name);
        let secret = entries
            .get(&key)
            .ok_or_else(|| ClientError::NotFound(format!("credential '{key}'")))?;
        let entry = StoredPassword {
            name: key.clone(),
            realm: Some(realm.to_string()),
            username: name.to_string(),
            clear_password: SecretString::new(secret.clone().into()),
        };
        let copies = if self.duplicate_on_get { 2 } else { 1 };
        Ok(vec![entry; copies])
    }

    async fn delete_credential(&self, realm: &str, name: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push("delete".to_string());
        if self.fail_delete {
            return Err(api_error(500));
        }
        let key = Self::key(realm, name);
        match self.entries.lock().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(ClientError::NotFound(format!("credential '{key}'"))),
        }
    }
}
