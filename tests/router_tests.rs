// tests/router_tests.rs

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use mbti_hub::{
    config::Config, routes, seed::seed_sample_data, state::AppState, store::MemoryStore,
};
use serde_json::Value;
use tower::ServiceExt;

async fn seeded_router() -> Router {
    let store = Arc::new(MemoryStore::new());
    seed_sample_data(store.as_ref()).await.unwrap();

    let config = Config {
        database_url: None,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        seed_sample_data: true,
    };

    routes::create_router(AppState { store, config })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn seeded_catalog_is_served() {
    let app = seeded_router().await;

    let response = app
        .oneshot(Request::get("/api/home").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["popularTests"].as_array().unwrap().len(), 6);
    for category in body["data"]["categories"].as_array().unwrap() {
        assert!(category["tests"].as_array().unwrap().len() <= 3);
    }
}

#[tokio::test]
async fn seeded_tests_are_publishable() {
    let app = seeded_router().await;

    let listing = body_json(
        app.clone()
            .oneshot(Request::get("/api/tests").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;

    for test in listing["data"].as_array().unwrap() {
        let uri = format!("/api/tests/{}/validation", test["id"]);
        let report = body_json(
            app.clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(report["data"]["publishable"], true);
        assert!(report["data"]["issues"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn missing_result_is_404_envelope() {
    let app = seeded_router().await;

    let response = app
        .oneshot(Request::get("/api/results/9999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Result not found");
}

#[tokio::test]
async fn allowed_origin_gets_cors_headers() {
    let app = seeded_router().await;

    let response = app
        .oneshot(
            Request::get("/api/categories")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}
