//! Integration tests for the `/api/v1/assets` routes.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    asset_uri, body_json, build_test_app, delete, empty_state, get, post_json, put_json,
};

fn asset_body(owner: &str, code: &str, asset_type: &str, status: &str, value: i64) -> Value {
    json!({
        "Owner": owner,
        "Status": status,
        "Type": asset_type,
        "Department": "Склад",
        "Code": code,
        "Value": value,
        "Date": "02.04.2023 09:01",
    })
}

#[tokio::test]
async fn create_then_get_returns_record() {
    let state = empty_state();
    let body = asset_body("Склад", "М2", "Хранение", "Готов к продаже", 60);

    let response = post_json(build_test_app(state.clone()), "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["ID"], "Склад:М2");

    let response = get(build_test_app(state), &asset_uri("Склад:М2")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], created["data"]);
    assert_eq!(json["data"]["Value"], 60);
}

#[tokio::test]
async fn duplicate_create_returns_409() {
    let state = empty_state();
    let body = asset_body("w", "M2", "storage", "ready", 60);

    let first = post_json(build_test_app(state.clone()), "/api/v1/assets", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(build_test_app(state), "/api/v1/assets", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "ALREADY_EXISTS");
    assert_eq!(json["error"], "the asset w:M2 already exists");
}

#[tokio::test]
async fn deal_with_wrong_status_returns_422_and_writes_nothing() {
    let state = empty_state();
    let body = asset_body("Офис", "Д1", "Сделка", "Подписан", 5);

    let response = post_json(build_test_app(state.clone()), "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "INVALID_STATE");
    assert_eq!(state.key_count().await, 0);
}

#[tokio::test]
async fn deal_with_initial_agreement_is_created() {
    let state = empty_state();
    let body = asset_body("Офис", "Д1", "Сделка", "Первичная договоренность", 5);

    let response = post_json(build_test_app(state), "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn get_missing_returns_404() {
    let response = get(build_test_app(empty_state()), &asset_uri("nobody:M0")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let state = empty_state();
    post_json(
        build_test_app(state.clone()),
        "/api/v1/assets",
        asset_body("w", "M2", "storage", "ready", 60),
    )
    .await;

    let replacement = json!({
        "Owner": "w",
        "Status": "sold",
        "Type": "other",
        "Department": "",
        "Code": "M2",
        "Value": -3,
        "Date": "",
    });
    let response = put_json(build_test_app(state.clone()), "/api/v1/assets", replacement).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(state), &asset_uri("w:M2")).await).await;
    assert_eq!(json["data"]["Status"], "sold");
    assert_eq!(json["data"]["Type"], "other");
    assert_eq!(json["data"]["Department"], "");
    assert_eq!(json["data"]["Value"], -3);
}

#[tokio::test]
async fn update_missing_returns_404() {
    let response = put_json(
        build_test_app(empty_state()),
        "/api/v1/assets",
        asset_body("w", "M9", "storage", "ready", 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_exists_is_false() {
    let state = empty_state();
    post_json(
        build_test_app(state.clone()),
        "/api/v1/assets",
        asset_body("w", "M2", "storage", "ready", 60),
    )
    .await;

    let exists_uri = "/api/v1/assets/w:M2/exists";
    let exists = body_json(get(build_test_app(state.clone()), exists_uri).await).await;
    assert_eq!(exists["data"], true);

    let response = delete(build_test_app(state.clone()), "/api/v1/assets/w:M2").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let exists = body_json(get(build_test_app(state.clone()), exists_uri).await).await;
    assert_eq!(exists["data"], false);

    let again = delete(build_test_app(state), "/api/v1/assets/w:M2").await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_after_init_returns_seed_catalogue() {
    let state = empty_state();

    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/ledger/init",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 10);

    let json = body_json(get(build_test_app(state), "/api/v1/assets").await).await;
    let assets = json["data"].as_array().unwrap();
    assert_eq!(assets.len(), 10);
    assert!(assets.iter().all(|asset| asset["Owner"] == "Склад"));
}

#[tokio::test]
async fn init_on_non_empty_ledger_reports_seeded_assets_only() {
    let state = empty_state();
    let body = asset_body("Офис", "Д1", "Сделка", "Первичная договоренность", 0);
    let response = post_json(build_test_app(state.clone()), "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        build_test_app(state.clone()),
        "/api/v1/ledger/init",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 10);
    assert_eq!(state.key_count().await, 11);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let response = post_json(
        build_test_app(empty_state()),
        "/api/v1/assets",
        json!({ "Owner": "w", "Value": "sixty" }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn get_resolves_id_with_reserved_characters() {
    let state = empty_state();
    let body = asset_body("Отдел 1/2", "Д?1", "Хранение", "Готов к продаже", 5);
    let response = post_json(build_test_app(state.clone()), "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(build_test_app(state), &asset_uri("Отдел 1/2:Д?1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["ID"], "Отдел 1/2:Д?1");
}
