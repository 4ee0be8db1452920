//! Audit trail over the HTTP surface.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, TEST_ACTOR};

/// Fetch the audit list, retrying briefly since entries land on a
/// spawned task after the mutation response is sent.
async fn wait_for_entries(app: &TestApp, expected: usize) -> serde_json::Value {
    for _ in 0..50 {
        let (status, body) = app.get("/api/audit").await;
        assert_eq!(status, StatusCode::OK);
        if body.as_array().map(|a| a.len()).unwrap_or(0) >= expected {
            return body;
        }
        tokio::task::yield_now().await;
    }
    panic!("audit entries never appeared");
}

#[tokio::test]
async fn test_each_mutation_writes_one_entry() {
    let app = TestApp::new();

    let (_, category) = app
        .send_json("POST", "/api/catalog/categories", json!({"name": "Finance"}))
        .await;
    let id = category["id"].as_str().unwrap().to_string();
    app.send_json(
        "PATCH",
        &format!("/api/catalog/categories/{id}"),
        json!({"description": "Money"}),
    )
    .await;
    app.send_json("DELETE", &format!("/api/catalog/categories/{id}"), json!({}))
        .await;

    let body = wait_for_entries(&app, 3).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    // Newest first.
    let actions: Vec<&str> = entries.iter().map(|e| e["action"].as_str().unwrap()).collect();
    assert_eq!(
        actions,
        vec!["category.delete", "category.update", "category.create"]
    );
    for entry in entries {
        assert_eq!(entry["actor"], TEST_ACTOR);
        assert_eq!(entry["role"], "admin");
        assert_eq!(entry["entityType"], "category");
    }
}

#[tokio::test]
async fn test_reads_are_not_audited() {
    let app = TestApp::new();

    app.get("/api/catalog/tree").await;
    app.get("/api/health").await;

    let (status, body) = app.get("/api/audit").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_limit_caps_results() {
    let app = TestApp::new();

    for i in 0..5 {
        app.send_json(
            "POST",
            "/api/catalog/categories",
            json!({"name": format!("Category {i}")}),
        )
        .await;
    }
    wait_for_entries(&app, 5).await;

    let (status, body) = app.get("/api/audit?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}
