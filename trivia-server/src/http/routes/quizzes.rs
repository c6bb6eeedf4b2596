//! Quiz endpoint
//!
//! The client holds the round: it sends back every id it has already
//! shown and receives one unseen question, or no question once the pool
//! is exhausted.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use trivia_core::{CategoryFilter, QuizOutcome, QuizRequest, ValidationError};

use super::common::QuestionResponse;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;

/// Category reference as sent by clients: `"all"`, an id, or an id string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Text(String),
}

impl CategoryRef {
    /// Legacy clients send id 0 for "all categories"; only the wire
    /// format knows about that sentinel.
    pub fn to_filter(&self) -> Result<CategoryFilter, ValidationError> {
        let id = match self {
            Self::Id(id) => *id,
            Self::Text(text) if text.trim().eq_ignore_ascii_case("all") => {
                return Ok(CategoryFilter::All)
            }
            Self::Text(text) => text.trim().parse().map_err(|_| ValidationError::InvalidFormat {
                field: "quiz_category",
                reason: "must be \"all\" or a category id",
            })?,
        };

        Ok(match id {
            0 => CategoryFilter::All,
            id => CategoryFilter::Category(id),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryRef,
}

/// Quiz request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequestBody {
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Vec<i64>,
}

impl QuizRequestBody {
    pub fn to_request(&self) -> Result<QuizRequest, ValidationError> {
        let category = match &self.quiz_category {
            Some(c) => c.id.to_filter()?,
            None => CategoryFilter::All,
        };
        Ok(QuizRequest::new(category, self.previous_questions.iter().copied()))
    }
}

/// Next question, absent when the round is complete
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionResponse>,
}

/// POST /quizzes - draw the next unseen question
async fn next_question(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<QuizRequestBody>,
) -> Result<Json<QuizResponse>, ApiError> {
    let request = body.to_request()?;
    let outcome = state.selector.select(state.store.as_ref(), &request).await?;

    let question = match outcome {
        QuizOutcome::Next(q) => Some(QuestionResponse::from(q)),
        QuizOutcome::Complete => None,
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Quiz routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quizzes", post(next_question))
}
