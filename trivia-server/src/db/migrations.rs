//! Schema for the trivia tables
//!
//! Column names follow the legacy trivia database (`categories.type`,
//! `questions.category`), so existing dumps load unchanged.

use sqlx::PgPool;
use trivia_core::SeedData;

use super::store::DbError;

/// Create tables if they do not exist.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running trivia migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            type TEXT NOT NULL CHECK (length(btrim(type)) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id BIGSERIAL PRIMARY KEY,
            question TEXT NOT NULL CHECK (length(btrim(question)) > 0),
            answer TEXT NOT NULL CHECK (length(btrim(answer)) > 0),
            difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5),
            category BIGINT NOT NULL REFERENCES categories(id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category, id)")
        .execute(pool)
        .await?;

    tracing::info!("Trivia migrations complete");
    Ok(())
}

/// Load seed data in one transaction.
///
/// Categories keep their seed ids; questions get fresh ids. Existing
/// categories with the same id are relabelled.
pub async fn seed(pool: &PgPool, seed: SeedData) -> Result<usize, DbError> {
    let (categories, questions) = seed.into_parts().map_err(DbError::Seed)?;
    let mut tx = pool.begin().await?;

    for category in &categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET type = EXCLUDED.type
            "#,
        )
        .bind(category.id)
        .bind(&category.label)
        .execute(&mut *tx)
        .await?;
    }

    // Explicit ids above leave the sequence behind
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('categories', 'id'), GREATEST((SELECT MAX(id) FROM categories), 1))",
    )
    .execute(&mut *tx)
    .await?;

    for question in &questions {
        sqlx::query(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES ($1, $2, $3, $4)",
        )
        .bind(question.text())
        .bind(question.answer())
        .bind(i32::from(question.difficulty().get()))
        .bind(question.category_id())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "seed data loaded"
    );
    Ok(questions.len())
}
