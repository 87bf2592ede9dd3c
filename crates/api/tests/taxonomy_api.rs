//! HTTP-level integration tests for the `/api/categories` and `/api/tags`
//! resources.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn test_category_create_update_get() {
    let app = build_test_app();
    let id = create(&app, "/api/categories", json!({ "name": "Travel" })).await;

    let response = put_json(
        app.clone(),
        "/api/categories",
        json!({ "id": id, "name": "Trips" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["x-blogapp-alert"],
        "blogApp.category.updated"
    );

    let fetched = body_json(get(app, &format!("/api/categories/{id}")).await).await;
    assert_eq!(fetched, json!({ "id": id, "name": "Trips" }));
}

#[tokio::test]
async fn test_category_update_without_id_is_idnull() {
    let app = build_test_app();

    let response = put_json(app, "/api/categories", json!({ "name": "x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-blogapp-params"], "category");
}

#[tokio::test]
async fn test_tag_list_and_delete() {
    let app = build_test_app();
    let a = create(&app, "/api/tags", json!({ "name": "a" })).await;
    let b = create(&app, "/api/tags", json!({ "name": "b" })).await;

    let list = body_json(get(app.clone(), "/api/tags").await).await;
    assert_eq!(
        list,
        json!([{ "id": a, "name": "a" }, { "id": b, "name": "b" }])
    );

    let response = delete(app.clone(), &format!("/api/tags/{a}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-blogapp-params"], a.to_string());

    let list = body_json(get(app, "/api/tags").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_tag_detaches_it_from_entries() {
    let app = build_test_app();
    let tag = create(&app, "/api/tags", json!({ "name": "fleeting" })).await;
    let entry = create(
        &app,
        "/api/entries",
        json!({ "title": "Tagged", "tags": [{ "id": tag, "name": "fleeting" }] }),
    )
    .await;

    delete(app.clone(), &format!("/api/tags/{tag}")).await;

    let fetched = body_json(get(app, &format!("/api/entries/{entry}")).await).await;
    assert_eq!(fetched["tags"], json!([]));
}

#[tokio::test]
async fn test_tag_name_longer_than_255_chars_is_rejected() {
    let app = build_test_app();

    let response = post_json(app, "/api/tags", json!({ "name": "x".repeat(256) })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-blogapp-error"], "error.validation");
}
