use std::time::Duration;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, MockConfig, DEFAULT_KEY, SUBSCRIPTION_KEY_HEADER};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(SUBSCRIPTION_KEY_HEADER, DEFAULT_KEY)
        .body(String::new())
        .unwrap()
}

// --- authentication ---

#[tokio::test]
async fn missing_key_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/javni/sudovi")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert!(body["error_message"].is_string());
}

#[tokio::test]
async fn wrong_key_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/javni/sudovi")
                .header("Ocp-Apim-Subscription-Key", "nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn configured_key_is_honoured() {
    let config = MockConfig {
        subscription_key: "other".to_string(),
        ..MockConfig::default()
    };
    let resp = app_with(config)
        .oneshot(
            Request::builder()
                .uri("/api/javni/counts")
                .header(SUBSCRIPTION_KEY_HEADER, "other")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- routing ---

#[tokio::test]
async fn unknown_endpoint_returns_404() {
    let resp = app().oneshot(authed("/api/javni/nepostojece")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_audience_returns_404() {
    let resp = app().oneshot(authed("/api/privatni/sudovi")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn state_bodies_surface_is_served() {
    let resp = app()
        .oneshot(authed("/api/drzavna_tijela/snapshots"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn plain_codebooks_return_an_array() {
    let resp = app().oneshot(authed("/api/javni/valute")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

// --- subject details ---

#[tokio::test]
async fn details_by_oib() {
    let resp = app()
        .oneshot(authed(
            "/api/javni/detalji_subjekta?tip_identifikatora=oib&identifikator=53056966535",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["mbs"], "080000001");
    assert_eq!(body["sud_id_nadlezan"], 3);
    assert!(body.get("sud_nadlezan").is_none());
}

#[tokio::test]
async fn details_with_expanded_relations() {
    let resp = app()
        .oneshot(authed(
            "/api/javni/detalji_subjekta?tip_identifikatora=mbs&identifikator=030000003&expand_relations=true",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["sud_nadlezan"]["naziv"], "Trgovački sud u Splitu");
}

#[tokio::test]
async fn details_missing_subject_returns_404() {
    let resp = app()
        .oneshot(authed(
            "/api/javni/detalji_subjekta?tip_identifikatora=mbs&identifikator=999",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn details_missing_subject_without_no_data_error_is_empty() {
    let resp = app()
        .oneshot(authed(
            "/api/javni/detalji_subjekta?tip_identifikatora=mbs&identifikator=999&no_data_error=false",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({}));
}

// --- subjects ---

#[tokio::test]
async fn subjects_filter_by_name_case_insensitively() {
    let resp = app()
        .oneshot(authed("/api/javni/subjekti?tvrtka_naziv=ALFA"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn subjects_only_active_and_paging() {
    let resp = app()
        .oneshot(authed("/api/javni/subjekti?only_active=true&offset=1&limit=5"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["tvrtka"], "Beta d.d.");
}

#[tokio::test]
async fn subjects_bad_offset_returns_400() {
    let resp = app()
        .oneshot(authed("/api/javni/subjekti?offset=-3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- generated company names ---

#[tokio::test]
async fn company_names_are_generated_up_to_the_configured_count() {
    let config = MockConfig {
        company_name_rows: 5,
        ..MockConfig::default()
    };
    let resp = app_with(config)
        .oneshot(authed("/api/javni/tvrtke?offset=3&limit=10"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = body_json(resp).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["mbs"], "100000003");

    let resp = app().oneshot(authed("/api/javni/tvrtke")).await.unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}

// --- delay ---

#[tokio::test(start_paused = true)]
async fn delay_is_applied_before_responding() {
    let config = MockConfig {
        delay: Some(Duration::from_secs(5)),
        ..MockConfig::default()
    };
    let started = tokio::time::Instant::now();
    let resp = app_with(config)
        .oneshot(authed("/api/javni/statusi"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_secs(5));
}
