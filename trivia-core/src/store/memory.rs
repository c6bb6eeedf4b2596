//! In-memory question store
//!
//! Backed by ordered maps behind a tokio `RwLock`: reads share the lock,
//! writes take it exclusively. Ids are handed out under the write lock,
//! so concurrent creates never receive the same id.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::QuestionStore;
use crate::error::{Result, TriviaError};
use crate::models::{
    Category, CategoryId, NewQuestion, Question, QuestionId, QuestionPatch, ValidationError,
};
use crate::seed::SeedData;

#[derive(Debug, Default)]
struct Inner {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    next_id: QuestionId,
}

impl Inner {
    fn check_category(&self, id: CategoryId) -> Result<()> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory { id }.into())
        }
    }
}

/// Question store held entirely in process memory
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a store with the given categories and no questions.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let categories = categories.into_iter().map(|c| (c.id, c)).collect();
        Self {
            inner: RwLock::new(Inner {
                categories,
                questions: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Build a store from seed data, validating every question.
    pub async fn from_seed(seed: SeedData) -> Result<Self> {
        let (categories, questions) = seed.into_parts()?;
        let store = Self::new(categories);
        for question in questions {
            store.create(question).await?;
        }

        tracing::debug!(
            questions = store.inner.read().await.questions.len(),
            "memory store seeded"
        );
        Ok(store)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.inner.read().await.categories.values().cloned().collect())
    }

    async fn category(&self, id: CategoryId) -> Result<Category> {
        self.inner
            .read()
            .await
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(|| TriviaError::category_not_found(id))
    }

    async fn create(&self, question: NewQuestion) -> Result<Question> {
        let mut inner = self.inner.write().await;
        inner.check_category(question.category_id())?;

        let id = inner.next_id;
        inner.next_id += 1;

        let question = question.into_question(id);
        inner.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn get(&self, id: QuestionId) -> Result<Question> {
        self.inner
            .read()
            .await
            .questions
            .get(&id)
            .cloned()
            .ok_or_else(|| TriviaError::question_not_found(id))
    }

    async fn update(&self, id: QuestionId, patch: QuestionPatch) -> Result<Question> {
        let mut inner = self.inner.write().await;
        let current = inner
            .questions
            .get(&id)
            .ok_or_else(|| TriviaError::question_not_found(id))?;

        let updated = patch.apply_to(current);
        inner.check_category(updated.category_id)?;

        inner.questions.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: QuestionId) -> Result<()> {
        self.inner
            .write()
            .await
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| TriviaError::question_not_found(id))
    }

    async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Question>> {
        Ok(self
            .inner
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Question>> {
        Ok(self.inner.read().await.questions.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            Category::new(1, "Science").unwrap(),
            Category::new(3, "Geography").unwrap(),
        ])
    }

    fn new_question(text: &str, category: CategoryId) -> NewQuestion {
        NewQuestion::new(text, "A", category, 2).unwrap()
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = store();
        let created = store
            .create(NewQuestion::new("Q?", "A", 3, 2).unwrap())
            .await
            .unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched.text, "Q?");
        assert_eq!(fetched.answer, "A");
        assert_eq!(fetched.category_id, 3);
        assert_eq!(fetched.difficulty.get(), 2);
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let err = store().create(new_question("Q?", 42)).await.unwrap_err();
        assert!(matches!(
            err,
            TriviaError::Validation(ValidationError::UnknownCategory { id: 42 })
        ));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = store();
        let q = store.create(new_question("Q?", 1)).await.unwrap();

        store.delete(q.id).await.unwrap();
        assert!(matches!(
            store.get(q.id).await.unwrap_err(),
            TriviaError::NotFound { .. }
        ));
        assert!(matches!(
            store.delete(q.id).await.unwrap_err(),
            TriviaError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn ids_not_reused_after_delete() {
        let store = store();
        let first = store.create(new_question("One", 1)).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(new_question("Two", 1)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn failed_update_leaves_record_untouched() {
        let store = store();
        let q = store.create(new_question("Q?", 1)).await.unwrap();

        let patch = QuestionPatch::new(Some("Changed?"), None, Some(99), None).unwrap();
        let err = store.update(q.id, patch).await.unwrap_err();
        assert!(matches!(err, TriviaError::Validation(_)));

        assert_eq!(store.get(q.id).await.unwrap(), q);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let patch = QuestionPatch::new(Some("Changed?"), None, None, None).unwrap();
        let err = store().update(5, patch).await.unwrap_err();
        assert!(matches!(err, TriviaError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_by_category_is_ascending() {
        let store = store();
        store.create(new_question("a", 3)).await.unwrap();
        store.create(new_question("b", 1)).await.unwrap();
        store.create(new_question("c", 3)).await.unwrap();

        let ids: Vec<_> = store
            .list_by_category(3)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_unique_ids() {
        let store = Arc::new(store());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create(new_question(&format!("Q{i}"), 1))
                        .await
                        .expect("create failed")
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.expect("task panicked")));
        }
        assert_eq!(ids.len(), 50);
    }
}
