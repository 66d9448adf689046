// src/handlers/category.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::category::CategoryTests,
    store::Store,
    utils::response::ok,
};

/// Lists all categories, ordered by name.
pub async fn list_categories(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    let categories = store.list_categories().await?;
    Ok(ok(categories))
}

/// Retrieves a single category by ID.
pub async fn get_category(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let category = store
        .get_category(id)
        .await?
        .ok_or(AppError::NotFound("Category not found".to_string()))?;

    Ok(ok(category))
}

/// Lists every test in one category, newest first.
pub async fn list_category_tests(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let category = store
        .get_category(id)
        .await?
        .ok_or(AppError::NotFound("Category not found".to_string()))?;

    let tests = store.list_tests(Some(category.id), None).await?;

    Ok(ok(CategoryTests { category, tests }))
}
