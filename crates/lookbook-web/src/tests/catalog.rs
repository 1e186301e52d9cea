use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;

use super::harness::{TestHarness, decode_json, json_request};

#[tokio::test]
async fn filters_report_distinct_values_per_facet() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/filters")
                .body(Body::empty())
                .expect("filters request"),
        )
        .await
        .expect("filters response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["lengths"], json!(["Long", "Medium", "Short"]));
    // Pose labels stay in their stored backend form on the wire.
    assert!(
        payload["poses"]
            .as_array()
            .expect("poses array")
            .contains(&json!("Straight-on"))
    );
}

#[tokio::test]
async fn hairstyle_listing_honors_comma_separated_facet_filters() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/hairstyles?length=Short,Medium&texture=Straight")
                .body(Body::empty())
                .expect("list request"),
        )
        .await
        .expect("list response");
    assert_eq!(response.status(), StatusCode::OK);
    let rows: Vec<serde_json::Value> = decode_json(response).await;
    assert!(!rows.is_empty());
    for row in &rows {
        let length = row["length"].as_str().expect("length");
        assert!(length == "Short" || length == "Medium");
        assert_eq!(row["texture"], "Straight");
    }
}

#[tokio::test]
async fn hairstyle_listing_search_scans_tags() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/hairstyles?search=bohemian")
                .body(Body::empty())
                .expect("search request"),
        )
        .await
        .expect("search response");
    assert_eq!(response.status(), StatusCode::OK);
    let rows: Vec<serde_json::Value> = decode_json(response).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Curly Shag");
}

#[tokio::test]
async fn get_by_id_round_trips_and_unknown_id_is_404() {
    let harness = TestHarness::setup();
    let id = harness.any_hairstyle_id();

    let response = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/hairstyles/{id}"))
                .body(Body::empty())
                .expect("get request"),
        )
        .await
        .expect("get response");
    assert_eq!(response.status(), StatusCode::OK);
    let row: serde_json::Value = decode_json(response).await;
    assert_eq!(row["id"], json!(id));

    let missing = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/hairstyles/no-such-id")
                .body(Body::empty())
                .expect("missing request"),
        )
        .await
        .expect("missing response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let payload: serde_json::Value = decode_json(missing).await;
    assert_eq!(payload["code"], "NOT_FOUND");
    assert!(payload["trace_id"].as_str().is_some_and(|x| !x.is_empty()));
}

#[tokio::test]
async fn create_persists_a_new_hairstyle_with_defaults() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/hairstyles",
            json!({
                "name": "Wolf Cut",
                "category": "Medium",
                "length": "Medium",
                "texture": "Wavy",
                "face_shapes": ["Oval"],
                "image_url": "https://example.com/wolf.jpg",
                "tags": ["shaggy", "trendy"]
            }),
        ))
        .await
        .expect("create response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let row: serde_json::Value = decode_json(response).await;
    assert_eq!(row["style_type"], "Unisex");
    assert_eq!(row["pose"], "Straight-on");

    let id = row["id"].as_str().expect("id");
    let fetched = harness
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/hairstyles/{id}"))
                .body(Body::empty())
                .expect("fetch request"),
        )
        .await
        .expect("fetch response");
    assert_eq!(fetched.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_rejects_blank_required_fields() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/hairstyles",
            json!({
                "name": "  ",
                "category": "Short",
                "length": "Short",
                "texture": "Straight",
                "image_url": "https://example.com/x.jpg"
            }),
        ))
        .await
        .expect("create response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "VALIDATION_FAILED");
}
