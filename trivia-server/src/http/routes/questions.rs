//! Question endpoints: paginated listing, CRUD, and search

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use trivia_core::{
    paginate, Category, CategoryIndex, NewQuestion, Pagination, QuestionPatch, SearchService,
    QUESTIONS_PER_PAGE,
};

use super::common::{
    parse_optional, parse_required, to_responses, LenientInt, QuestionResponse, ALL_CATEGORIES,
};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;

/// Query parameters for the paginated listing
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

/// Create question request. Fields are optional so that a missing field
/// is reported as a validation failure rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LenientInt>,
    pub difficulty: Option<LenientInt>,
}

/// Partial update request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LenientInt>,
    pub difficulty: Option<LenientInt>,
}

/// Search request
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    /// Restrict the search to one category
    pub category: Option<LenientInt>,
}

/// One page of questions
#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
    pub current_category: String,
}

/// Single question
#[derive(Debug, Serialize)]
pub struct QuestionDetailResponse {
    pub success: bool,
    #[serde(flatten)]
    pub question: QuestionResponse,
}

/// Acknowledges a write
#[derive(Debug, Serialize)]
pub struct QuestionIdResponse {
    pub success: bool,
    pub question_id: i64,
}

/// Search hits
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: usize,
    pub current_category: String,
}

/// GET /questions?page=N - ten questions per page, ascending id
async fn list_questions(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let pagination = Pagination::new(params.page.unwrap_or(1), QUESTIONS_PER_PAGE)?;
    let questions = state.store.list_all().await?;
    let categories = CategoryIndex::load(state.store.as_ref()).await?;

    let page = paginate(questions, pagination);
    tracing::debug!(
        page = page.page,
        total = page.total,
        pages = page.total_pages(),
        "question page"
    );

    Ok(Json(QuestionPageResponse {
        success: true,
        total_questions: page.total,
        questions: to_responses(page.items),
        categories: categories.list(),
        current_category: ALL_CATEGORIES.to_string(),
    }))
}

/// GET /questions/{id}
async fn get_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<QuestionDetailResponse>, ApiError> {
    let question = state.store.get(id).await?;

    Ok(Json(QuestionDetailResponse {
        success: true,
        question: question.into(),
    }))
}

/// POST /questions - create a question
async fn create_question(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateQuestionRequest>,
) -> Result<Json<QuestionIdResponse>, ApiError> {
    let new_question = NewQuestion::new(
        req.question.as_deref().unwrap_or_default(),
        req.answer.as_deref().unwrap_or_default(),
        parse_required(req.category.as_ref(), "category")?,
        parse_required(req.difficulty.as_ref(), "difficulty")?,
    )?;

    let question = state.store.create(new_question).await?;
    tracing::info!(question_id = question.id, category = question.category_id, "question created");

    Ok(Json(QuestionIdResponse {
        success: true,
        question_id: question.id,
    }))
}

/// PATCH /questions/{id} - update some fields of a question
async fn update_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ApiJson(req): ApiJson<UpdateQuestionRequest>,
) -> Result<Json<QuestionIdResponse>, ApiError> {
    let patch = QuestionPatch::new(
        req.question.as_deref(),
        req.answer.as_deref(),
        parse_optional(req.category.as_ref(), "category")?,
        parse_optional(req.difficulty.as_ref(), "difficulty")?,
    )?;

    let question = state.store.update(id, patch).await?;
    tracing::info!(question_id = question.id, "question updated");

    Ok(Json(QuestionIdResponse {
        success: true,
        question_id: question.id,
    }))
}

/// DELETE /questions/{id}
async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<QuestionIdResponse>, ApiError> {
    state.store.delete(id).await?;
    tracing::info!(question_id = id, "question deleted");

    Ok(Json(QuestionIdResponse {
        success: true,
        question_id: id,
    }))
}

/// POST /questions/search - case-insensitive substring search
async fn search_questions(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = req.search_term.as_deref().unwrap_or_default();
    let search = SearchService::new(state.store.as_ref());

    let (results, current_category) = match parse_optional(req.category.as_ref(), "category")? {
        Some(category_id) => {
            let results = search.search_in(term, category_id).await?;
            let label = state.store.category(category_id).await?.label;
            (results, label)
        }
        None => (search.search(term).await?, ALL_CATEGORIES.to_string()),
    };

    Ok(Json(SearchResponse {
        success: true,
        total_questions: results.total,
        questions: to_responses(results.questions),
        current_category,
    }))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route(
            "/questions/{id}",
            get(get_question).patch(update_question).delete(delete_question),
        )
        .route("/questions/search", post(search_questions))
}
