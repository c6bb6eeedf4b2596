//! Route handlers organized by resource

pub mod common;
pub mod health;
pub mod categories;
pub mod questions;
pub mod quizzes;
