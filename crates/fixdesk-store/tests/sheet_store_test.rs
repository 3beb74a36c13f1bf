// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the sheet-backed record store against a mock
//! values API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixdesk_config::model::SheetConfig;
use fixdesk_core::FixdeskError;
use fixdesk_core::traits::record_store::RecordStore;
use fixdesk_core::types::Category;
use fixdesk_store::SheetStore;

fn store_for(server: &MockServer) -> SheetStore {
    let config = SheetConfig {
        spreadsheet_id: "sheet-1".into(),
        ..SheetConfig::default()
    };
    SheetStore::new(config)
        .expect("client builds")
        .with_base_url(server.uri())
}

fn sample_row(id: &str) -> serde_json::Value {
    json!([
        id,
        "2026-02-14 09:30:00",
        "14/02/2026",
        "09:30 AM",
        "Alex",
        "1001",
        "ICT",
        "Computer Lab",
        "Projector dead",
        "https://blob.example/o/p.jpg?token=t",
        "New"
    ])
}

#[tokio::test]
async fn read_all_parses_rows_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:K"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A2:K",
            "values": [sample_row("A0001"), sample_row("A0000")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = store_for(&server).read_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "A0001");
    assert_eq!(records[1].id.as_str(), "A0000");
    assert_eq!(records[0].category, Category::Ict);
    assert_eq!(records[0].location, "Computer Lab");
}

#[tokio::test]
async fn read_all_rejects_drifted_rows() {
    let server = MockServer::start().await;
    let mut short_row = sample_row("A0000");
    short_row.as_array_mut().unwrap().pop();

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:K"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "values": [sample_row("A0001"), short_row] })),
        )
        .mount(&server)
        .await;

    let err = store_for(&server).read_all().await.unwrap_err();
    match err {
        FixdeskError::InvalidRecord { row, .. } => assert_eq!(row, 3),
        other => panic!("expected InvalidRecord, got {other}"),
    }
}

#[tokio::test]
async fn count_reads_the_id_column() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [["A0001"], ["A0000"]],
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).count().await.unwrap(), 2);
}

#[tokio::test]
async fn count_of_empty_sheet_is_zero() {
    let server = MockServer::start().await;
    // The values API omits `values` entirely when the range is empty.
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:A"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "range": "Sheet1!A2:A" })),
        )
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).count().await.unwrap(), 0);
}

#[tokio::test]
async fn insert_top_opens_a_row_then_writes_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [{
                "insertDimension": {
                    "range": {
                        "sheetId": 0,
                        "dimension": "ROWS",
                        "startIndex": 1,
                        "endIndex": 2,
                    }
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:K2"))
        .and(query_param("valueInputOption", "RAW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let record = fixdesk_test_utils::record_fixture(3);
    store_for(&server).insert_top(&record).await.unwrap();
}

#[tokio::test]
async fn transient_server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:A"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [["A0000"]],
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).count().await.unwrap(), 1);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Sheet1!A2:A"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = store_for(&server).count().await.unwrap_err();
    match err {
        FixdeskError::Store { message, .. } => {
            assert!(message.contains("403"), "message should carry status: {message}");
        }
        other => panic!("expected Store error, got {other}"),
    }
}
