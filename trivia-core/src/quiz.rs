//! Quiz round selection
//!
//! Selection is stateless: the caller keeps the ids already shown in the
//! round and sends them back on every call. Each call resolves the pool
//! for the category filter, removes the excluded ids, and draws one of
//! the remaining questions uniformly at random.
//!
//! ```text
//! IN_PROGRESS(excluded) --select--> IN_PROGRESS(excluded ∪ {chosen})
//! IN_PROGRESS(excluded) --select, no candidates--> COMPLETE
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TriviaError};
use crate::models::{CategoryId, Question, QuestionId};
use crate::store::QuestionStore;

/// Which questions are eligible for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Category(CategoryId),
}

/// One selection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub category: CategoryFilter,
    /// Ids already shown in this round. Unknown ids are ignored.
    pub excluded: HashSet<QuestionId>,
}

impl QuizRequest {
    pub fn new(category: CategoryFilter, excluded: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            category,
            excluded: excluded.into_iter().collect(),
        }
    }
}

/// Result of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    /// A question the player has not seen yet
    Next(Question),
    /// Every question in the pool has been shown
    Complete,
}

impl QuizOutcome {
    pub fn question(&self) -> Option<&Question> {
        match self {
            Self::Next(q) => Some(q),
            Self::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Uniform index source for candidate selection
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. `len` is always at least 1.
    ///
    /// An index outside that range makes selection fail with `Internal`.
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic generator for reproducible rounds
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Picks the next question of a round
#[derive(Clone)]
pub struct QuizSelector {
    random: Arc<dyn RandomSource>,
}

impl QuizSelector {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Selector seeded for reproducible draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(SeededRandom::new(seed)))
    }

    /// Select the next question for a round.
    ///
    /// # Errors
    /// - `NotFound` if the filter names a category that does not exist
    /// - `Unprocessable` if the pool is empty
    /// - store errors unchanged
    pub async fn select(&self, store: &dyn QuestionStore, request: &QuizRequest) -> Result<QuizOutcome> {
        let pool = match request.category {
            CategoryFilter::All => store.list_all().await?,
            CategoryFilter::Category(id) => {
                store.category(id).await?;
                store.list_by_category(id).await?
            }
        };

        if pool.is_empty() {
            return Err(TriviaError::unprocessable(match request.category {
                CategoryFilter::All => "question bank is empty".to_string(),
                CategoryFilter::Category(id) => format!("category {} has no questions", id),
            }));
        }

        let mut candidates: Vec<Question> = pool
            .into_iter()
            .filter(|q| !request.excluded.contains(&q.id))
            .collect();

        if candidates.is_empty() {
            tracing::debug!(filter = ?request.category, "quiz round complete");
            return Ok(QuizOutcome::Complete);
        }

        let len = candidates.len();
        let index = self.random.pick(len);
        if index >= len {
            return Err(TriviaError::internal(format!(
                "random source returned index {} for {} candidates",
                index, len
            )));
        }
        let chosen = candidates.swap_remove(index);
        tracing::debug!(
            filter = ?request.category,
            remaining = candidates.len(),
            question_id = chosen.id,
            "quiz question selected"
        );
        Ok(QuizOutcome::Next(chosen))
    }
}

impl Default for QuizSelector {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewQuestion};
    use crate::store::MemoryStore;

    /// Sports (6) holds ids 1 and 2, Art (2) is empty.
    async fn store() -> MemoryStore {
        let store = MemoryStore::new(vec![
            Category::new(2, "Art").unwrap(),
            Category::new(6, "Sports").unwrap(),
        ]);
        for text in ["First World Cup winner?", "Only team at every World Cup?"] {
            store
                .create(NewQuestion::new(text, "A", 6, 3).unwrap())
                .await
                .unwrap();
        }
        store
    }

    struct AlwaysFirst;

    impl RandomSource for AlwaysFirst {
        fn pick(&self, _len: usize) -> usize {
            0
        }
    }

    struct OutOfRange;

    impl RandomSource for OutOfRange {
        fn pick(&self, len: usize) -> usize {
            len
        }
    }

    #[tokio::test]
    async fn bad_random_index_is_internal_error() {
        let store = store().await;
        let err = QuizSelector::new(Arc::new(OutOfRange))
            .select(&store, &QuizRequest::new(CategoryFilter::All, []))
            .await
            .unwrap_err();
        assert!(matches!(err, TriviaError::Internal { .. }));
    }

    #[tokio::test]
    async fn single_candidate_is_chosen() {
        let store = store().await;
        let selector = QuizSelector::default();

        let outcome = selector
            .select(&store, &QuizRequest::new(CategoryFilter::Category(6), [1]))
            .await
            .unwrap();
        assert_eq!(outcome.question().map(|q| q.id), Some(2));
    }

    #[tokio::test]
    async fn exhausted_pool_completes() {
        let store = store().await;
        let selector = QuizSelector::default();
        let request = QuizRequest::new(CategoryFilter::Category(6), [1, 2]);

        assert!(selector.select(&store, &request).await.unwrap().is_complete());
        // terminal state is idempotent
        assert!(selector.select(&store, &request).await.unwrap().is_complete());
    }

    #[tokio::test]
    async fn stale_excluded_ids_ignored() {
        let store = store().await;
        let selector = QuizSelector::new(Arc::new(AlwaysFirst));

        let outcome = selector
            .select(&store, &QuizRequest::new(CategoryFilter::All, [999, -1]))
            .await
            .unwrap();
        assert_eq!(outcome.question().map(|q| q.id), Some(1));
    }

    #[tokio::test]
    async fn empty_category_is_unprocessable() {
        let store = store().await;
        let err = QuizSelector::default()
            .select(&store, &QuizRequest::new(CategoryFilter::Category(2), []))
            .await
            .unwrap_err();
        assert!(matches!(err, TriviaError::Unprocessable { .. }));
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let store = store().await;
        let err = QuizSelector::default()
            .select(&store, &QuizRequest::new(CategoryFilter::Category(42), []))
            .await
            .unwrap_err();
        assert!(matches!(err, TriviaError::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_bank_is_unprocessable() {
        let err = QuizSelector::default()
            .select(&MemoryStore::default(), &QuizRequest::new(CategoryFilter::All, []))
            .await
            .unwrap_err();
        assert!(matches!(err, TriviaError::Unprocessable { .. }));
    }

    #[tokio::test]
    async fn seeded_rounds_are_reproducible() {
        let store = store().await;

        let mut rounds = Vec::new();
        for _ in 0..2 {
            let selector = QuizSelector::seeded(7);
            let mut excluded = Vec::new();
            while let QuizOutcome::Next(q) = selector
                .select(&store, &QuizRequest::new(CategoryFilter::All, excluded.clone()))
                .await
                .unwrap()
            {
                excluded.push(q.id);
            }
            rounds.push(excluded);
        }

        assert_eq!(rounds[0], rounds[1]);
        assert_eq!(rounds[0].len(), 2);
    }
}
