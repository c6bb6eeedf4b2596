//! trivia-core: question bank and quiz engine
//!
//! - `store`: question/category persistence seam plus an in-memory store
//! - `categories`: id → label resolution
//! - `models::pagination`: ascending-id page slicing
//! - `search`: case-insensitive substring search
//! - `quiz`: stateless next-question selection

pub mod categories;
pub mod error;
pub mod models;
pub mod quiz;
pub mod search;
pub mod seed;
pub mod store;

pub use categories::CategoryIndex;
pub use error::{Result, TriviaError};
pub use models::{
    paginate, Category, CategoryId, Difficulty, NewQuestion, Page, Pagination, Question,
    QuestionId, QuestionPatch, ValidationError, QUESTIONS_PER_PAGE,
};
pub use quiz::{CategoryFilter, QuizOutcome, QuizRequest, QuizSelector, RandomSource, SeededRandom, ThreadRandom};
pub use search::{SearchResults, SearchService};
pub use seed::SeedData;
pub use store::{MemoryStore, QuestionStore};
