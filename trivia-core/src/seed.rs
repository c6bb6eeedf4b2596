//! Seed data for populating a store
//!
//! JSON document with two arrays:
//!
//! ```json
//! {
//!   "categories": [{ "id": 1, "label": "Science" }],
//!   "questions": [{ "question": "…", "answer": "…", "category": 1, "difficulty": 4 }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TriviaError};
use crate::models::{Category, NewQuestion};

/// Question bank shipped with the crate (six categories)
const BUNDLED_SEED: &str = include_str!("../seed/trivia.json");

/// Raw seed document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub questions: Vec<SeedQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl SeedData {
    /// Parse a seed document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TriviaError::json("seed data", e))
    }

    /// Read and parse a seed file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TriviaError::json(path.display().to_string(), e))
    }

    /// The question bank bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_SEED)
    }

    /// Validate every record. Category references are left to the store.
    pub fn into_parts(self) -> Result<(Vec<Category>, Vec<NewQuestion>)> {
        let categories = self
            .categories
            .iter()
            .map(|c| Category::new(c.id, &c.label))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let questions = self
            .questions
            .iter()
            .map(|q| NewQuestion::new(&q.question, &q.answer, q.category, q.difficulty))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok((categories, questions))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::ValidationError;

    #[test]
    fn bundled_seed_is_valid() {
        let (categories, questions) = SeedData::bundled().unwrap().into_parts().unwrap();
        assert_eq!(categories.len(), 6);
        assert!(questions.len() >= 10);
        assert!(questions
            .iter()
            .all(|q| categories.iter().any(|c| c.id == q.category_id())));
    }

    #[test]
    fn rejects_bad_difficulty() {
        let seed = SeedData::from_json(
            r#"{"categories":[{"id":1,"label":"Science"}],
                "questions":[{"question":"Q?","answer":"A","category":1,"difficulty":0}]}"#,
        )
        .unwrap();
        let err = seed.into_parts().unwrap_err();
        assert!(matches!(
            err,
            TriviaError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"categories":[{{"id":2,"label":"Art"}}]}}"#).unwrap();
        file.flush().unwrap();

        let seed = SeedData::from_path(file.path()).unwrap();
        assert_eq!(seed.categories.len(), 1);
        assert!(seed.questions.is_empty());
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = SeedData::from_json("{not json").unwrap_err();
        assert!(matches!(err, TriviaError::Json { .. }));
    }
}
