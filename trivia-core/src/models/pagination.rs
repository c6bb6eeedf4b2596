//! Pagination over ordered question sets
//!
//! Pages are 1-indexed and always sliced from an ascending-id ordering,
//! so repeated calls against an unchanged store return identical pages.

use super::question::Question;
use super::validation::ValidationError;

/// Fixed page size for question listings
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed, unbounded above)
    pub page: u64,
    /// Items per page
    pub per_page: usize,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page must be at least 1 (any larger page is valid, past the end is empty)
    /// - Per page must be at least 1
    pub fn new(page: i64, per_page: usize) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::OutOfRange {
                field: "page",
                value: page,
                min: 1,
                max: i64::MAX,
            });
        }
        if per_page == 0 {
            return Err(ValidationError::OutOfRange {
                field: "page size",
                value: 0,
                min: 1,
                max: i64::MAX,
            });
        }

        Ok(Self {
            page: page as u64,
            per_page,
        })
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> usize {
        usize::try_from(self.page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> usize {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: QUESTIONS_PER_PAGE,
        }
    }
}

/// One page of results plus the size of the full set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: usize,
    /// Current page number
    pub page: u64,
    /// Items per page
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> usize {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

/// Slice one page out of a question sequence.
///
/// The input is re-sorted by ascending id whatever order it arrives in.
/// A page past the end yields no items but still reports the full total.
pub fn paginate(mut questions: Vec<Question>, pagination: Pagination) -> Page<Question> {
    questions.sort_by_key(|q| q.id);
    let total = questions.len();

    let items = questions
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit())
        .collect();

    Page {
        items,
        total,
        page: pagination.page,
        per_page: pagination.per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewQuestion;

    fn questions(ids: &[i64]) -> Vec<Question> {
        ids.iter()
            .map(|&id| {
                NewQuestion::new(&format!("Question {id}"), "A", 1, 1)
                    .unwrap()
                    .into_question(id)
            })
            .collect()
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).unwrap().offset(), 0);
        assert_eq!(Pagination::new(2, 10).unwrap().offset(), 10);
        assert_eq!(Pagination::new(3, 25).unwrap().offset(), 50);
    }

    #[test]
    fn rejects_page_zero() {
        let err = Pagination::new(0, 10).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "page", .. }));
        assert!(Pagination::new(-4, 10).is_err());
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Pagination::new(1, 0).is_err());
    }

    #[test]
    fn sorts_before_slicing() {
        let page = paginate(questions(&[5, 2, 9, 1]), Pagination::new(1, 3).unwrap());
        let ids: Vec<_> = page.items.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
        assert_eq!(page.total, 4);
    }

    #[test]
    fn past_the_end_is_empty() {
        let page = paginate(questions(&[1, 2, 3]), Pagination::new(7, 10).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 7);
    }

    #[test]
    fn huge_page_is_empty_not_error() {
        for page in [4_294_967_296, i64::MAX] {
            let pagination = Pagination::new(page, 10).unwrap();
            let result = paginate(questions(&[1, 2, 3]), pagination);
            assert!(result.items.is_empty());
            assert_eq!(result.total, 3);
            assert_eq!(result.page, page as u64);
        }
    }

    #[test]
    fn total_pages() {
        let page = paginate(questions(&[]), Pagination::default());
        assert_eq!(page.total_pages(), 1);

        let ids: Vec<i64> = (1..=25).collect();
        let page = paginate(questions(&ids), Pagination::default());
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items.len(), 10);
    }
}
