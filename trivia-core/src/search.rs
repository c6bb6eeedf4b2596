//! Substring search over question text

use crate::error::Result;
use crate::models::{CategoryId, Question, ValidationError};
use crate::store::QuestionStore;

/// Search hits in ascending id order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total: usize,
}

/// Case-insensitive substring search backed by a store
pub struct SearchService<'a> {
    store: &'a dyn QuestionStore,
}

impl<'a> SearchService<'a> {
    pub fn new(store: &'a dyn QuestionStore) -> Self {
        Self { store }
    }

    /// Search the whole bank.
    ///
    /// A blank term is rejected rather than treated as "match everything".
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let needle = normalize_term(term)?;
        let questions = self.store.list_all().await?;
        Ok(filter(questions, &needle))
    }

    /// Search within one category. Unknown category is `NotFound`.
    pub async fn search_in(&self, term: &str, category_id: CategoryId) -> Result<SearchResults> {
        let needle = normalize_term(term)?;
        self.store.category(category_id).await?;
        let questions = self.store.list_by_category(category_id).await?;
        Ok(filter(questions, &needle))
    }
}

fn normalize_term(term: &str) -> Result<String> {
    if term.trim().is_empty() {
        return Err(ValidationError::Empty { field: "searchTerm" }.into());
    }
    Ok(term.to_lowercase())
}

fn filter(questions: Vec<Question>, needle: &str) -> SearchResults {
    let mut questions: Vec<_> = questions
        .into_iter()
        .filter(|q| q.text.to_lowercase().contains(needle))
        .collect();
    questions.sort_by_key(|q| q.id);

    tracing::debug!(needle, hits = questions.len(), "question search");
    SearchResults {
        total: questions.len(),
        questions,
    }
}
