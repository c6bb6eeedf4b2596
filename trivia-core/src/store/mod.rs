//! Question storage
//!
//! `QuestionStore` is the seam between the engine and persistence. All
//! listings come back in ascending id order; write validation follows the
//! same rules in every implementation:
//! - `create` / `update` reject unknown categories with `Validation`
//! - `get` / `update` / `delete` report a missing id with `NotFound`
//! - a failed `update` leaves the stored record untouched

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Category, CategoryId, NewQuestion, Question, QuestionId, QuestionPatch};

pub use memory::MemoryStore;

/// Durable collection of questions and categories
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All categories, ascending by id.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// A single category, or `NotFound`.
    async fn category(&self, id: CategoryId) -> Result<Category>;

    /// Insert a question and return it with its freshly assigned id.
    async fn create(&self, question: NewQuestion) -> Result<Question>;

    async fn get(&self, id: QuestionId) -> Result<Question>;

    /// Apply a partial update atomically and return the new record.
    async fn update(&self, id: QuestionId, patch: QuestionPatch) -> Result<Question>;

    async fn delete(&self, id: QuestionId) -> Result<()>;

    /// Questions in one category, ascending by id.
    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Question>>;

    /// Every question, ascending by id.
    async fn list_all(&self) -> Result<Vec<Question>>;
}
