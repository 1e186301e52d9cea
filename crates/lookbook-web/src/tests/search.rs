use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;

use super::harness::{TestHarness, decode_json, json_request};

#[tokio::test]
async fn preview_matches_phrases_and_tokens_against_catalog_vocabulary() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/search/preview",
            json!({ "raw_text": "pixie cut curly" }),
        ))
        .await
        .expect("preview response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["matches"]["matched"]["lengths"], json!(["Short"]));
    assert_eq!(
        payload["matches"]["matched"]["style_types"],
        json!(["Feminine"])
    );
    assert_eq!(payload["matches"]["matched"]["textures"], json!(["Curly"]));
    assert!(
        payload["matches"]["leftover"]
            .as_array()
            .expect("leftover array")
            .is_empty()
    );
    assert_eq!(payload["changed"], true);
}

#[tokio::test]
async fn preview_serves_pose_matches_in_display_form() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/search/preview",
            json!({ "raw_text": "side profile" }),
        ))
        .await
        .expect("preview response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["matches"]["matched"]["poses"], json!(["Side"]));

    let facing = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/search/preview",
            json!({ "raw_text": "front facing" }),
        ))
        .await
        .expect("preview response");
    let payload: serde_json::Value = decode_json(facing).await;
    assert_eq!(payload["matches"]["matched"]["poses"], json!(["Facing"]));
    // The encoded backend query translates the display label back.
    assert_eq!(payload["query"], json!([["pose", "Straight-on"]]));
}

#[tokio::test]
async fn preview_reports_no_change_for_repeated_input() {
    let harness = TestHarness::setup();
    let first = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/search/preview",
            json!({ "raw_text": "blahblah updo" }),
        ))
        .await
        .expect("first response");
    let first_payload: serde_json::Value = decode_json(first).await;
    assert_eq!(first_payload["changed"], true);
    assert_eq!(first_payload["state"]["search"], "blahblah updo");

    let second = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/search/preview",
            json!({
                "state": first_payload["state"],
                "raw_text": "blahblah updo"
            }),
        ))
        .await
        .expect("second response");
    let second_payload: serde_json::Value = decode_json(second).await;
    assert_eq!(second_payload["changed"], false);
}
