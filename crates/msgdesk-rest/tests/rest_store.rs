// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RestStore against a mock PostgREST server.

use msgdesk_config::model::RestConfig;
use msgdesk_core::rows;
use msgdesk_core::{Category, HealthStatus, RecordStore, Row, StoreAdapter, Table};
use msgdesk_rest::RestStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> RestStore {
    RestStore::new(&RestConfig {
        url: Some(server.uri()),
        api_key: Some("anon".into()),
        timeout_secs: Some(5),
    })
    .expect("store should build")
}

#[tokio::test]
async fn categories_are_read_in_name_order_and_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/email_categories"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "c1",
                "name": "Onboarding",
                "description": null,
                "created_at": "2026-03-01T10:00:00+00:00",
                "updated_at": "2026-03-01T10:00:00+00:00"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let table = Table::EmailCategories;
    let raw = store.select_all(table, table.default_order()).await.unwrap();
    let categories: Vec<Category> = rows::decode(table, raw).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Onboarding");
    assert!(categories[0].description.is_none());
}

#[tokio::test]
async fn assignments_are_read_without_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/funnel_content_assignments"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let rows = store
        .select_all(Table::FunnelContentAssignments, None)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn delete_of_missing_id_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/text_messages"))
        .and(query_param("id", "eq.nope"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.delete(Table::TextMessages, "nope").await.unwrap();
}

#[tokio::test]
async fn update_rejects_unknown_column_locally() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    let mut patch = Row::new();
    patch.insert("created_date".into(), serde_json::Value::Null);
    assert!(store.update(Table::EmailMessages, "m1", patch).await.is_err());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn health_check_reports_reachability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sales_funnels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sales_funnels"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    match store.health_check().await.unwrap() {
        HealthStatus::Unhealthy(reason) => assert!(reason.contains("Invalid API key")),
        other => panic!("expected unhealthy, got {other:?}"),
    }
}
