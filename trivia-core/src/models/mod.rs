//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod question;
pub mod pagination;

pub use validation::ValidationError;
pub use category::{Category, CategoryId};
pub use question::{Difficulty, NewQuestion, Question, QuestionId, QuestionPatch};
pub use pagination::{paginate, Page, Pagination, QUESTIONS_PER_PAGE};
