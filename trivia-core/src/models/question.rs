//! Question records and validated write payloads

use super::category::CategoryId;
use super::validation::{non_empty, ValidationError};

/// Question identifier (positive, assigned by the store)
pub type QuestionId = i64;

/// Lowest allowed difficulty
pub const MIN_DIFFICULTY: i64 = 1;

/// Highest allowed difficulty
pub const MAX_DIFFICULTY: i64 = 5;

/// Difficulty rating in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Create a difficulty, rejecting values outside 1..=5.
    ///
    /// # Example
    /// ```
    /// use trivia_core::models::Difficulty;
    ///
    /// assert_eq!(Difficulty::new(3).unwrap().get(), 3);
    /// assert!(Difficulty::new(0).is_err());
    /// assert!(Difficulty::new(9).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                value,
                min: MIN_DIFFICULTY,
                max: MAX_DIFFICULTY,
            });
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Stored question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub category_id: CategoryId,
}

/// Validated payload for creating a question.
///
/// Category existence is checked by the store, since only it knows
/// which categories exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    text: String,
    answer: String,
    difficulty: Difficulty,
    category_id: CategoryId,
}

impl NewQuestion {
    /// Validate create input.
    ///
    /// # Rules
    /// - Text and answer non-empty after trimming
    /// - Difficulty in 1..=5
    /// - Category id positive
    pub fn new(
        text: &str,
        answer: &str,
        category_id: CategoryId,
        difficulty: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            text: non_empty("question", text)?,
            answer: non_empty("answer", answer)?,
            difficulty: Difficulty::new(difficulty)?,
            category_id: check_category_id(category_id)?,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Attach a store-assigned id.
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            difficulty: self.difficulty,
            category_id: self.category_id,
        }
    }
}

/// Validated partial update. At least one field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    text: Option<String>,
    answer: Option<String>,
    difficulty: Option<Difficulty>,
    category_id: Option<CategoryId>,
}

impl QuestionPatch {
    /// Validate every supplied field; an all-`None` patch is rejected.
    pub fn new(
        text: Option<&str>,
        answer: Option<&str>,
        category_id: Option<CategoryId>,
        difficulty: Option<i64>,
    ) -> Result<Self, ValidationError> {
        if text.is_none() && answer.is_none() && category_id.is_none() && difficulty.is_none() {
            return Err(ValidationError::InvalidFormat {
                field: "question",
                reason: "no fields to update",
            });
        }

        Ok(Self {
            text: text.map(|t| non_empty("question", t)).transpose()?,
            answer: answer.map(|a| non_empty("answer", a)).transpose()?,
            difficulty: difficulty.map(Difficulty::new).transpose()?,
            category_id: category_id.map(check_category_id).transpose()?,
        })
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Produce the updated record without touching the original.
    pub fn apply_to(&self, question: &Question) -> Question {
        Question {
            id: question.id,
            text: self.text.clone().unwrap_or_else(|| question.text.clone()),
            answer: self.answer.clone().unwrap_or_else(|| question.answer.clone()),
            difficulty: self.difficulty.unwrap_or(question.difficulty),
            category_id: self.category_id.unwrap_or(question.category_id),
        }
    }
}

fn check_category_id(id: CategoryId) -> Result<CategoryId, ValidationError> {
    if id < 1 {
        return Err(ValidationError::UnknownCategory { id });
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        NewQuestion::new("Q?", "A", 3, 2).unwrap().into_question(7)
    }

    #[test]
    fn new_question_valid() {
        let q = sample();
        assert_eq!(q.id, 7);
        assert_eq!(q.text, "Q?");
        assert_eq!(q.difficulty.get(), 2);
        assert_eq!(q.category_id, 3);
    }

    #[test]
    fn rejects_difficulty_out_of_range() {
        let err = NewQuestion::new("Q?", "A", 3, 9).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "difficulty",
                value: 9,
                ..
            }
        ));
    }

    #[test]
    fn rejects_blank_answer() {
        let err = NewQuestion::new("Q?", "   ", 3, 2).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "answer" });
    }

    #[test]
    fn rejects_zero_category() {
        let err = NewQuestion::new("Q?", "A", 0, 2).unwrap_err();
        assert_eq!(err, ValidationError::UnknownCategory { id: 0 });
    }

    #[test]
    fn empty_patch_rejected() {
        let err = QuestionPatch::new(None, None, None, None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn patch_validates_all_fields() {
        // A good text does not rescue a bad difficulty
        let err = QuestionPatch::new(Some("New?"), None, None, Some(6)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let original = sample();
        let patch = QuestionPatch::new(None, Some("B"), None, Some(5)).unwrap();
        let updated = patch.apply_to(&original);

        assert_eq!(updated.text, original.text);
        assert_eq!(updated.answer, "B");
        assert_eq!(updated.difficulty.get(), 5);
        assert_eq!(updated.category_id, original.category_id);
    }
}
