//! Category id → label resolution

use std::collections::BTreeMap;

use crate::error::{Result, TriviaError};
use crate::models::{Category, CategoryId};
use crate::store::QuestionStore;

/// Snapshot of the category table
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    labels: BTreeMap<CategoryId, String>,
}

impl CategoryIndex {
    /// Load every category from the store.
    pub async fn load(store: &dyn QuestionStore) -> Result<Self> {
        Ok(Self::from_categories(store.categories().await?))
    }

    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            labels: categories.into_iter().map(|c| (c.id, c.label)).collect(),
        }
    }

    /// Categories ordered by id. Empty is a valid answer.
    pub fn list(&self) -> Vec<Category> {
        self.labels
            .iter()
            .map(|(&id, label)| Category {
                id,
                label: label.clone(),
            })
            .collect()
    }

    /// Label for a category id, or `NotFound`.
    pub fn resolve(&self, id: CategoryId) -> Result<&str> {
        self.labels
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| TriviaError::category_not_found(id))
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn empty_store_gives_empty_list() {
        let index = CategoryIndex::load(&MemoryStore::default()).await.unwrap();
        assert!(index.list().is_empty());
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn resolves_labels_in_id_order() {
        let store = MemoryStore::new(vec![
            Category::new(6, "Sports").unwrap(),
            Category::new(1, "Science").unwrap(),
        ]);
        let index = CategoryIndex::load(&store).await.unwrap();

        let ids: Vec<_> = index.list().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 6]);
        assert_eq!(index.resolve(6).unwrap(), "Sports");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let index = CategoryIndex::from_categories(vec![Category::new(1, "Science").unwrap()]);
        let err = index.resolve(2).unwrap_err();
        assert!(matches!(err, TriviaError::NotFound { resource: "category", .. }));
    }
}
