//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use trivia_core::{Category, CategoryIndex};

use super::common::{to_responses, QuestionResponse};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;

/// Category list response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

/// Questions of one category
#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: usize,
    pub current_category: String,
}

/// GET /categories - all categories ordered by id
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let index = CategoryIndex::load(state.store.as_ref()).await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: index.list(),
    }))
}

/// GET /categories/{id}/questions - every question in one category
async fn list_category_questions(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let index = CategoryIndex::load(state.store.as_ref()).await?;
    let label = index.resolve(id)?.to_owned();
    let questions = state.store.list_by_category(id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions: to_responses(questions),
        current_category: label,
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(list_category_questions))
}
