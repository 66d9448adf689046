// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::quiz::TestSummary;

/// Represents the 'categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,

    /// Unique display name.
    pub name: String,

    pub emoji: String,

    pub description: String,

    /// Display color token (e.g., "bg-blue-500").
    pub color: String,

    pub created_at: chrono::DateTime<chrono::Utc>,

    #[serde(skip_serializing)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for get-or-create of a category during seeding.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub color: String,
}

/// A category together with a preview of its tests.
#[derive(Debug, Serialize)]
pub struct CategoryWithTests {
    #[serde(flatten)]
    pub category: Category,
    pub tests: Vec<TestSummary>,
}

/// Response body for a category's test listing.
#[derive(Debug, Serialize)]
pub struct CategoryTests {
    pub category: Category,
    pub tests: Vec<TestSummary>,
}
