//! Wire types shared by several routes

use serde::{Deserialize, Serialize};
use trivia_core::{Question, ValidationError};

/// Label reported when a listing is not filtered by category
pub const ALL_CATEGORIES: &str = "All";

/// Question as sent to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: u8,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.text,
            answer: q.answer,
            category: q.category_id,
            difficulty: q.difficulty.get(),
        }
    }
}

pub fn to_responses(questions: Vec<Question>) -> Vec<QuestionResponse> {
    questions.into_iter().map(QuestionResponse::from).collect()
}

/// Integer field that older clients send as a string ("3")
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Int(i64),
    Text(String),
}

impl LenientInt {
    pub fn parse(&self, field: &'static str) -> Result<i64, ValidationError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Text(s) => s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "must be an integer",
            }),
        }
    }
}

/// Parse an optional lenient integer, keeping `None` as `None`.
pub fn parse_optional(
    value: Option<&LenientInt>,
    field: &'static str,
) -> Result<Option<i64>, ValidationError> {
    value.map(|v| v.parse(field)).transpose()
}

/// Parse a lenient integer that must be present.
pub fn parse_required(value: Option<&LenientInt>, field: &'static str) -> Result<i64, ValidationError> {
    parse_optional(value, field)?.ok_or(ValidationError::Empty { field })
}
