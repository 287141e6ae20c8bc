//! In-memory review store.
//!
//! Mirrors the PostgreSQL store, including the `rating` CHECK constraint and
//! monotonically increasing ids that are never reused after a delete.

use super::{ReviewStore, StoreError, StoreResult};
use crate::domain::{Review, ReviewId, MAX_RATING, MIN_RATING};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<ReviewId, Review>,
    last_id: ReviewId,
}

#[derive(Default)]
pub struct MemoryReviewStore {
    inner: RwLock<Inner>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn check_constraints(review: &Review) -> StoreResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
        return Err(StoreError::Constraint {
            message: format!("rating {} violates check constraint", review.rating),
        });
    }
    Ok(())
}

impl Inner {
    fn insert(&mut self, review: &Review) -> Review {
        self.last_id += 1;
        let row = review.clone().with_id(self.last_id);
        self.rows.insert(row.id, row.clone());
        row
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn list_all(&self) -> StoreResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().rev().cloned().collect())
    }

    async fn get_by_id(&self, id: ReviewId) -> StoreResult<Review> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, review: &Review) -> StoreResult<Review> {
        check_constraints(review)?;
        let mut inner = self.inner.write().await;
        Ok(inner.insert(review))
    }

    async fn create_batch(&self, reviews: &[Review]) -> StoreResult<Vec<Review>> {
        // All-or-nothing: check every row before inserting any.
        for review in reviews {
            check_constraints(review)?;
        }
        let mut inner = self.inner.write().await;
        Ok(reviews.iter().map(|review| inner.insert(review)).collect())
    }

    async fn update(&self, review: &Review) -> StoreResult<Review> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&review.id) else {
            return Err(StoreError::NotFound { id: review.id });
        };
        check_constraints(review)?;
        *row = review.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: ReviewId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
