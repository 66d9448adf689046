// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{category, home, quiz, result},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (categories, tests, results, home).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store and configuration).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let category_routes = Router::new()
        .route("/", get(category::list_categories))
        .route("/{id}", get(category::get_category))
        .route("/{id}/tests", get(category::list_category_tests));

    let test_routes = Router::new()
        .route("/", get(quiz::list_tests))
        .route("/popular", get(quiz::popular_tests))
        .route("/{id}", get(quiz::get_test))
        .route("/{id}/validation", get(quiz::validate_test))
        .route("/{id}/score", post(quiz::score_answers));

    let result_routes = Router::new()
        .route("/", get(result::list_results).post(result::create_result))
        .route("/{id}", get(result::get_result));

    Router::new()
        .nest("/api/categories", category_routes)
        .nest("/api/tests", test_routes)
        .nest("/api/results", result_routes)
        .route("/api/home", get(home::home_data))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
