//! Versioning and rollback over the HTTP surface.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn create_calculator(app: &TestApp) -> String {
    let (status, body) = app
        .send_json(
            "POST",
            "/api/catalog/calculators",
            json!({
                "name": "Loan",
                "logicSource": "v1 logic",
                "uiDocument": {"rev": 1}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["currentVersion"], 1);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_version_create_and_list() {
    let app = TestApp::new();
    let id = create_calculator(&app).await;

    let (status, v2) = app
        .send_json(
            "POST",
            &format!("/api/catalog/calculators/{id}/versions"),
            json!({"logicSource": "v2 logic", "notes": "tweak"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(v2["version"], 2);
    assert_eq!(v2["changedBy"], crate::helpers::TEST_ACTOR);

    app.send_json(
        "POST",
        &format!("/api/catalog/calculators/{id}/versions"),
        json!({"logicSource": "v3 logic"}),
    )
    .await;

    let (status, rows) = app.get(&format!("/api/catalog/calculators/{id}/versions")).await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<i64> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![3, 2]);

    let (_, live) = app.get(&format!("/api/catalog/calculators/{id}")).await;
    assert_eq!(live["currentVersion"], 3);
    assert_eq!(live["logicSource"], "v3 logic");
}

#[tokio::test]
async fn test_rollback_restores_live_payload() {
    let app = TestApp::new();
    let id = create_calculator(&app).await;

    let (_, v2) = app
        .send_json(
            "POST",
            &format!("/api/catalog/calculators/{id}/versions"),
            json!({"logicSource": "v2 logic"}),
        )
        .await;
    app.send_json(
        "POST",
        &format!("/api/catalog/calculators/{id}/versions"),
        json!({"logicSource": "v3 logic"}),
    )
    .await;

    let version_id = v2["id"].as_str().unwrap();
    let (status, rolled) = app
        .send_json(
            "POST",
            &format!("/api/catalog/calculators/{id}/rollback/{version_id}"),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rolled["currentVersion"], 2);
    assert_eq!(rolled["logicSource"], "v2 logic");

    // Rollback never deletes history.
    let (_, rows) = app.get(&format!("/api/catalog/calculators/{id}/versions")).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rollback_with_foreign_version_is_404() {
    let app = TestApp::new();
    let first = create_calculator(&app).await;
    let second = create_calculator(&app).await;

    let (_, version) = app
        .send_json(
            "POST",
            &format!("/api/catalog/calculators/{first}/versions"),
            json!({}),
        )
        .await;
    let version_id = version["id"].as_str().unwrap();

    let (status, body) = app
        .send_json(
            "POST",
            &format!("/api/catalog/calculators/{second}/rollback/{version_id}"),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_metadata_patch_does_not_create_versions() {
    let app = TestApp::new();
    let id = create_calculator(&app).await;

    app.send_json(
        "PATCH",
        &format!("/api/catalog/calculators/{id}"),
        json!({"logicSource": "edited in place"}),
    )
    .await;

    let (_, rows) = app.get(&format!("/api/catalog/calculators/{id}/versions")).await;
    assert!(rows.as_array().unwrap().is_empty());

    let (_, live) = app.get(&format!("/api/catalog/calculators/{id}")).await;
    assert_eq!(live["currentVersion"], 1);
    assert_eq!(live["logicSource"], "edited in place");
}
