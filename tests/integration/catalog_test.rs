//! Catalog CRUD and tree integration tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_category_requires_actor() {
    let app = TestApp::new();

    let (status, body) = app
        .send_json_anonymous("POST", "/api/catalog/categories", json!({"name": "Finance"}))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_category_lifecycle() {
    let app = TestApp::new();

    let (status, created) = app
        .send_json(
            "POST",
            "/api/catalog/categories",
            json!({"name": "Finance", "tags": ["money"]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Finance");
    assert_eq!(created["order"], 0);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .send_json(
            "PATCH",
            &format!("/api/catalog/categories/{id}"),
            json!({"description": "Money things"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Money things");
    assert_eq!(updated["name"], "Finance");

    let (status, deleted) = app
        .send_json("DELETE", &format!("/api/catalog/categories/{id}"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["ok"], true);

    let (status, _) = app
        .send_json(
            "PATCH",
            &format!("/api/catalog/categories/{id}"),
            json!({"name": "Changed"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tree_nests_and_filters() {
    let app = TestApp::new();

    let (_, finance) = app
        .send_json("POST", "/api/catalog/categories", json!({"name": "Finance"}))
        .await;
    let finance_id = finance["id"].as_str().unwrap();
    let (_, health) = app
        .send_json("POST", "/api/catalog/categories", json!({"name": "Health", "order": 1}))
        .await;
    let health_id = health["id"].as_str().unwrap();

    app.send_json(
        "POST",
        "/api/catalog/calculators",
        json!({"name": "Mortgage Payment", "categoryId": finance_id}),
    )
    .await;
    app.send_json(
        "POST",
        "/api/catalog/calculators",
        json!({"name": "BMI", "categoryId": health_id}),
    )
    .await;

    let (status, body) = app.get("/api/catalog/tree").await;
    assert_eq!(status, StatusCode::OK);
    let tree = body["tree"].as_array().unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0]["name"], "Finance");
    assert_eq!(tree[0]["calculators"][0]["name"], "Mortgage Payment");

    let (status, body) = app.get("/api/catalog/tree?search=mortgage").await;
    assert_eq!(status, StatusCode::OK);
    let tree = body["tree"].as_array().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["name"], "Finance");
}

#[tokio::test]
async fn test_delete_category_orphans_calculator() {
    let app = TestApp::new();

    let (_, category) = app
        .send_json("POST", "/api/catalog/categories", json!({"name": "Finance"}))
        .await;
    let category_id = category["id"].as_str().unwrap().to_string();
    let (_, calculator) = app
        .send_json(
            "POST",
            "/api/catalog/calculators",
            json!({"name": "Loan", "categoryId": category_id}),
        )
        .await;
    let calculator_id = calculator["id"].as_str().unwrap().to_string();

    app.send_json("DELETE", &format!("/api/catalog/categories/{category_id}"), json!({}))
        .await;

    let (status, body) = app.get(&format!("/api/catalog/calculators/{calculator_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["categoryId"].is_null());
}

#[tokio::test]
async fn test_reorder_changes_tree_order() {
    let app = TestApp::new();

    let (_, a) = app
        .send_json("POST", "/api/catalog/categories", json!({"name": "Alpha"}))
        .await;
    let (_, b) = app
        .send_json("POST", "/api/catalog/categories", json!({"name": "Beta"}))
        .await;

    let (status, body) = app
        .send_json(
            "POST",
            "/api/catalog/categories/reorder",
            json!([
                {"id": a["id"], "order": 1},
                {"id": b["id"], "order": 0}
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (_, body) = app.get("/api/catalog/tree").await;
    let tree = body["tree"].as_array().unwrap();
    assert_eq!(tree[0]["name"], "Beta");
    assert_eq!(tree[1]["name"], "Alpha");
}
