//! PostgreSQL question store
//!
//! Implements `QuestionStore` over the `categories` and `questions`
//! tables:
//! - create: INSERT ... RETURNING (id from BIGSERIAL, atomic across callers)
//! - update: single UPDATE with COALESCE per field (all-or-nothing)
//! - unknown categories surface as foreign key violations

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use trivia_core::{
    Category, CategoryId, Difficulty, NewQuestion, Question, QuestionId, QuestionPatch,
    QuestionStore, Result, TriviaError, ValidationError,
};

const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    CorruptRow(String),

    #[error("seed data rejected: {0}")]
    Seed(#[source] TriviaError),
}

impl From<DbError> for TriviaError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Seed(inner) => inner,
            other => TriviaError::internal(other.to_string()),
        }
    }
}

/// Question row from database
#[derive(Debug, Clone, FromRow)]
struct QuestionRow {
    id: i64,
    question: String,
    answer: String,
    difficulty: i32,
    category: i64,
}

impl TryFrom<QuestionRow> for Question {
    type Error = DbError;

    fn try_from(row: QuestionRow) -> std::result::Result<Self, Self::Error> {
        let difficulty = Difficulty::new(i64::from(row.difficulty))
            .map_err(|e| DbError::CorruptRow(format!("question {}: {}", row.id, e)))?;

        Ok(Question {
            id: row.id,
            text: row.question,
            answer: row.answer,
            difficulty,
            category_id: row.category,
        })
    }
}

/// Category row from database
#[derive(Debug, Clone, FromRow)]
struct CategoryRow {
    id: i64,
    label: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            label: row.label,
        }
    }
}

/// Question store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_questions(&self, category: Option<CategoryId>) -> Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = match category {
            Some(id) => {
                sqlx::query_as(&format!(
                    "SELECT {QUESTION_COLUMNS} FROM questions WHERE category = $1 ORDER BY id"
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| Question::try_from(row).map_err(TriviaError::from))
            .collect()
    }
}

/// Map a write failure, turning foreign key violations into validation errors.
fn write_error(err: sqlx::Error, category_id: Option<CategoryId>) -> TriviaError {
    if let (sqlx::Error::Database(db), Some(id)) = (&err, category_id) {
        if db.is_foreign_key_violation() {
            return ValidationError::UnknownCategory { id }.into();
        }
    }
    DbError::from(err).into()
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn categories(&self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, type AS label FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(DbError::from)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn category(&self, id: CategoryId) -> Result<Category> {
        let row: CategoryRow = sqlx::query_as("SELECT id, type AS label FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| TriviaError::category_not_found(id))?;

        Ok(row.into())
    }

    async fn create(&self, question: NewQuestion) -> Result<Question> {
        let row: QuestionRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(question.text())
        .bind(question.answer())
        .bind(i32::from(question.difficulty().get()))
        .bind(question.category_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, Some(question.category_id())))?;

        Ok(Question::try_from(row)?)
    }

    async fn get(&self, id: QuestionId) -> Result<Question> {
        let row: QuestionRow = sqlx::query_as(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or_else(|| TriviaError::question_not_found(id))?;

        Ok(Question::try_from(row)?)
    }

    async fn update(&self, id: QuestionId, patch: QuestionPatch) -> Result<Question> {
        let row: QuestionRow = sqlx::query_as(&format!(
            r#"
            UPDATE questions SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                difficulty = COALESCE($4, difficulty),
                category = COALESCE($5, category)
            WHERE id = $1
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.text())
        .bind(patch.answer())
        .bind(patch.difficulty().map(|d| i32::from(d.get())))
        .bind(patch.category_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, patch.category_id()))?
        .ok_or_else(|| TriviaError::question_not_found(id))?;

        Ok(Question::try_from(row)?)
    }

    async fn delete(&self, id: QuestionId) -> Result<()> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(TriviaError::question_not_found(id));
        }
        Ok(())
    }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Question>> {
        self.fetch_questions(Some(category_id)).await
    }

    async fn list_all(&self) -> Result<Vec<Question>> {
        self.fetch_questions(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect, migrations, DEFAULT_MAX_CONNECTIONS};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p trivia-server -- --ignored

    #[test]
    fn corrupt_difficulty_is_reported() {
        let row = QuestionRow {
            id: 4,
            question: "Q?".into(),
            answer: "A".into(),
            difficulty: 11,
            category: 1,
        };
        let err = Question::try_from(row).unwrap_err();
        assert!(matches!(err, DbError::CorruptRow(_)));

        let err: TriviaError = err.into();
        assert!(matches!(err, TriviaError::Internal { .. }));
    }

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        sqlx::query("INSERT INTO categories (id, type) VALUES (1, 'Science') ON CONFLICT (id) DO NOTHING")
            .execute(&pool)
            .await
            .expect("category insert failed");
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_get_delete_roundtrip() {
        let store = store().await;
        let created = store
            .create(NewQuestion::new("Q?", "A", 1, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(store.get(created.id).await.unwrap(), created);

        store.delete(created.id).await.unwrap();
        assert!(matches!(
            store.delete(created.id).await.unwrap_err(),
            TriviaError::NotFound { .. }
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_category_is_validation_error() {
        let store = store().await;
        let err = store
            .create(NewQuestion::new("Q?", "A", 987_654, 2).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TriviaError::Validation(ValidationError::UnknownCategory { id: 987_654 })
        ));
    }
}
