//! Category records

use serde::{Deserialize, Serialize};

use super::validation::{non_empty, ValidationError};

/// Category identifier (positive, stable)
pub type CategoryId = i64;

/// A question category such as "Science" or "Sports"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

impl Category {
    /// Create a category, validating the id and label.
    ///
    /// # Example
    /// ```
    /// use trivia_core::models::Category;
    ///
    /// assert!(Category::new(1, "Science").is_ok());
    /// assert!(Category::new(0, "Science").is_err());
    /// assert!(Category::new(1, "  ").is_err());
    /// ```
    pub fn new(id: CategoryId, label: &str) -> Result<Self, ValidationError> {
        if id < 1 {
            return Err(ValidationError::OutOfRange {
                field: "category id",
                value: id,
                min: 1,
                max: i64::MAX,
            });
        }

        Ok(Self {
            id,
            label: non_empty("category label", label)?,
        })
    }
}
