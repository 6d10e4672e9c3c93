//! Integration tests for `api-key`.

mod common;

use common::*;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_save_new_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{NS}/storage/passwords")))
        .and(body_string_contains("name=relay"))
        .and(body_string_contains("realm=cam_queue"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"entry": []})))
        .expect(1)
        .mount(&server)
        .await;

    cim_setup_cmd(&server.uri())
        .args(["api-key", "save", "--name", "relay", "--key", "s3cret"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Successfully saved API Key!"))
        .stdout(predicate::str::contains("s3cret").not());
}

#[tokio::test]
async fn test_show_key_json() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        &format!("{NS}/storage/passwords/cam_queue:relay:"),
        json!({"entry": [{"name": "cam_queue:relay:", "content": {
            "realm": "cam_queue", "username": "relay", "clear_password": "k-123"
        }}]}),
    )
    .await;

    let assert = cim_setup_cmd(&server.uri())
        .args(["-o", "json", "api-key", "show", "--name", "relay"])
        .assert()
        .code(0);
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["key"], json!("k-123"));
    assert_eq!(out["message"], json!("Successfully retrieved API Key!"));
}

#[tokio::test]
async fn test_show_missing_key_exits_4() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    cim_setup_cmd(&server.uri())
        .args(["api-key", "show", "--name", "relay"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to retrieve API Key!"));
}

#[tokio::test]
async fn test_delete_key() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{NS}/storage/passwords/cam_queue:relay:")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entry": []})))
        .expect(1)
        .mount(&server)
        .await;

    cim_setup_cmd(&server.uri())
        .args(["api-key", "delete", "--name", "relay"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Successfully deleted API Key!"));
}
