use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;

async fn app_with_user() -> (Router, String) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    let user = engine.create_user("alice").await.unwrap();
    (server::app(engine), user.token)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn call(
    app: &Router,
    token: &str,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

/// Create one group, party and wallet and return their ids.
async fn references(app: &Router, token: &str) -> (i64, i64, i64) {
    let (_, group) = call(app, token, "POST", "/v1/groups", Some(json!({"name": "Home"}))).await;
    let (_, party) = call(app, token, "POST", "/v1/parties", Some(json!({"name": "Shop"}))).await;
    let (_, wallet) = call(
        app,
        token,
        "POST",
        "/v1/wallets",
        Some(json!({"name": "Cash", "type": "cash"})),
    )
    .await;
    (
        group["data"]["id"].as_i64().unwrap(),
        party["data"]["id"].as_i64().unwrap(),
        wallet["data"]["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn requests_without_a_valid_token_are_rejected() {
    let (app, _token) = app_with_user().await;

    let request = Request::builder()
        .uri("/v1/groups")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthenticated");
    assert_eq!(body["errors"], json!([]));

    let (status, _) = call(&app, "not-a-token", "GET", "/v1/groups", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn current_user_is_returned_without_token() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(&app, &token, "GET", "/v1/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn category_is_only_visible_in_its_variant() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/categories",
        Some(json!({"type": "income", "name": "Salary"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Category created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["type"], "income");
    assert_eq!(body["data"]["name"], "Salary");

    let (status, body) = call(&app, &token, "GET", "/v1/categories/1?type=expense", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");

    let (status, body) = call(&app, &token, "GET", "/v1/categories/1?type=income", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Salary");
}

#[tokio::test]
async fn missing_or_unknown_type_is_a_bad_request() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(&app, &token, "GET", "/v1/categories", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid category type");

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/transactions",
        Some(json!({"type": "transfer", "amount": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid transaction type");

    let (status, body) = call(&app, &token, "GET", "/v1/transactions/1?type=loan", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid transaction type");
}

#[tokio::test]
async fn expense_without_references_reports_every_field() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/transactions",
        Some(json!({"type": "expense", "amount": 12.5, "date": "2024-07-20"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["party_id", "wallet_id", "group_id"]);

    let (status, body) = call(&app, &token, "GET", "/v1/transactions?type=expense", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn transaction_lifecycle() {
    let (app, token) = app_with_user().await;
    let (group_id, party_id, wallet_id) = references(&app, &token).await;

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/transactions",
        Some(json!({
            "type": "income",
            "date": "2024-07-01",
            "amount": "1500",
            "description": "July salary",
            "party_id": party_id,
            "wallet_id": wallet_id,
            "group_id": group_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Transaction created successfully");
    assert_eq!(body["data"]["type"], "income");
    assert_eq!(body["data"]["amount"], 1500.0);
    assert_eq!(body["data"]["date"], "2024-07-01");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        &token,
        "PUT",
        &format!("/v1/transactions/{id}?type=income"),
        Some(json!({
            "type": "expense",
            "date": "2024-07-02",
            "amount": 1600,
            "description": null,
            "party_id": party_id,
            "wallet_id": wallet_id,
            "group_id": group_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transaction updated successfully");
    assert_eq!(body["data"]["type"], "income");
    assert_eq!(body["data"]["amount"], 1600.0);
    assert_eq!(body["data"]["description"], Value::Null);

    let (status, _) = call(
        &app,
        &token,
        "GET",
        &format!("/v1/transactions/{id}?type=expense"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/v1/transactions/{id}?type=income");
    let (status, body) = call(&app, &token, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = call(&app, &token, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Transaction not found");
}

#[tokio::test]
async fn listings_are_paginated() {
    let (app, token) = app_with_user().await;
    for i in 0..21 {
        let (status, _) = call(
            &app,
            &token,
            "POST",
            "/v1/groups",
            Some(json!({"name": format!("Group {i}")})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call(&app, &token, "GET", "/v1/groups", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Operation successful");
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 20);
    assert_eq!(body["data"]["current_page"], 1);
    assert_eq!(body["data"]["per_page"], 20);
    assert_eq!(body["data"]["total"], 21);
    assert_eq!(body["data"]["last_page"], 2);

    let (_, body) = call(&app, &token, "GET", "/v1/groups?page=2", None).await;
    assert_eq!(body["data"]["data"][0]["name"], "Group 20");

    let (status, body) = call(
        &app,
        &token,
        "GET",
        "/v1/transactions?type=expense&page=18446744073709551615",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["current_page"], u64::MAX);

    let uri = format!("/v1/groups?page={}", u64::MAX);
    let (status, body) = call(&app, &token, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["total"], 21);
}

#[tokio::test]
async fn party_defaults_to_the_authenticated_user() {
    let (app, token) = app_with_user().await;
    let (_, user) = call(&app, &token, "GET", "/v1/user", None).await;

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/parties",
        Some(json!({"name": "Employer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_id"], user["data"]["id"]);

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/parties",
        Some(json!({"name": "Ghost", "user_id": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "user_id");
    assert_eq!(
        body["errors"][0]["message"],
        "The selected user_id is invalid."
    );
}

#[tokio::test]
async fn malformed_requests_get_a_failure_envelope() {
    let (app, token) = app_with_user().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/groups")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = call(&app, &token, "GET", "/v1/groups/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = call(&app, &token, "GET", "/v1/groups?page=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_group_answers_no_content() {
    let (app, token) = app_with_user().await;
    let (group_id, _, _) = references(&app, &token).await;

    let uri = format!("/v1/groups/{group_id}");
    let (status, body) = call(&app, &token, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = call(&app, &token, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Group not found");
}

#[tokio::test]
async fn expense_with_unknown_references_creates_nothing() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/transactions",
        Some(json!({
            "type": "expense",
            "date": "2024-07-20",
            "party_id": 1,
            "wallet_id": 1,
            "amount": 42.5,
            "group_id": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([
            {"field": "party_id", "message": "The selected party_id is invalid."},
            {"field": "wallet_id", "message": "The selected wallet_id is invalid."},
            {"field": "group_id", "message": "The selected group_id is invalid."},
        ])
    );

    let (_, body) = call(&app, &token, "GET", "/v1/transactions?type=expense", None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn mistyped_fields_are_validation_errors() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/transactions",
        Some(json!({"type": "expense", "description": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["date", "amount", "description", "party_id", "wallet_id", "group_id"]
    );
    assert_eq!(
        body["errors"][2]["message"],
        "The description field must be a string."
    );

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/wallets",
        Some(json!({"name": 5, "type": false})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([
            {"field": "name", "message": "The name field must be a string."},
            {"field": "type", "message": "The type field must be a string."},
        ])
    );
}

#[tokio::test]
async fn type_is_checked_before_the_body() {
    let (app, token) = app_with_user().await;

    let (status, body) = call(
        &app,
        &token,
        "PUT",
        "/v1/categories/1?type=bogus",
        Some(json!({"name": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid category type");

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/categories",
        Some(json!({"type": 1, "name": "Salary"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid category type");

    let (status, body) = call(
        &app,
        &token,
        "POST",
        "/v1/transactions",
        Some(json!({"type": ["expense"], "description": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid transaction type");
}
