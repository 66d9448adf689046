// src/handlers/home.rs

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;

use crate::{
    config::{CATEGORY_PREVIEW_LIMIT, POPULAR_TESTS_LIMIT},
    error::AppError,
    models::{category::CategoryWithTests, quiz::TestSummary},
    store::Store,
    utils::response::ok,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub popular_tests: Vec<TestSummary>,
    pub categories: Vec<CategoryWithTests>,
}

/// Home page summary.
///
/// * The most recently created tests stand in for "popular" ones.
/// * Every category carries a preview of its newest tests.
pub async fn home_data(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    let popular_tests = store.list_tests(None, Some(POPULAR_TESTS_LIMIT)).await?;

    let mut categories = Vec::new();
    for category in store.list_categories().await? {
        let tests = store
            .list_tests(Some(category.id), Some(CATEGORY_PREVIEW_LIMIT))
            .await?;
        categories.push(CategoryWithTests { category, tests });
    }

    Ok(ok(HomeData {
        popular_tests,
        categories,
    }))
}
