// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the blob store client against a mock storage API.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixdesk_blob::FirebaseBlobStore;
use fixdesk_config::model::BlobConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::blob_store::BlobStore;

fn store_for(server: &MockServer) -> FirebaseBlobStore {
    FirebaseBlobStore::new(BlobConfig {
        bucket: "relief.example.app".into(),
        ..BlobConfig::default()
    })
    .expect("client builds")
    .with_base_url(server.uri())
}

#[tokio::test]
async fn upload_returns_token_download_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/b/relief.example.app/o"))
        .and(query_param("name", "complaints/42_20260214_090500.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "complaints/42_20260214_090500.jpg",
            "downloadTokens": "tok-1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let blob = store_for(&server);
    let url = blob
        .upload(
            "complaints/42_20260214_090500.jpg",
            vec![0xFF, 0xD8],
            "image/jpeg",
        )
        .await
        .unwrap();

    assert!(url.contains("complaints%2F42_20260214_090500.jpg"));
    assert!(url.contains("alt=media"));
    assert!(url.contains("token=tok-1"));

    // The issued URL must invert back to the object path for re-fetching.
    assert_eq!(
        blob.object_path_from_url(&url).as_deref(),
        Some("complaints/42_20260214_090500.jpg")
    );
}

#[tokio::test]
async fn upload_without_token_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/b/relief.example.app/o"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "complaints/x.jpg",
        })))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .upload("complaints/x.jpg", vec![1], "image/jpeg")
        .await
        .unwrap_err();
    assert!(matches!(err, FixdeskError::Blob { .. }));
}

#[tokio::test]
async fn fetch_downloads_object_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/b/relief.example.app/o/complaints%2Fx.jpg"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = store_for(&server).fetch("complaints/x.jpg").await.unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn missing_object_is_a_blob_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/b/relief.example.app/o/complaints%2Fgone.jpg"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = store_for(&server)
        .fetch("complaints/gone.jpg")
        .await
        .unwrap_err();
    match err {
        FixdeskError::Blob { message, .. } => {
            assert!(message.contains("404"), "message should carry status: {message}");
        }
        other => panic!("expected Blob error, got {other}"),
    }
}

#[tokio::test]
async fn transient_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/b/relief.example.app/o/complaints%2Fx.jpg"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/b/relief.example.app/o/complaints%2Fx.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9]))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = store_for(&server).fetch("complaints/x.jpg").await.unwrap();
    assert_eq!(bytes, vec![9]);
}
