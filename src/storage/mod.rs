//! Review access layer.
//!
//! `ReviewStore` is the contract the HTTP layer programs against. Two
//! implementations exist:
//! - `PgReviewStore`: the production store, one parameterized SQL statement per
//!   operation against the `reviews` table.
//! - `MemoryReviewStore`: same semantics over an in-process map, used as the
//!   store behind the router in HTTP tests.

use crate::domain::{Review, ReviewId};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryReviewStore;
pub use postgres::PgReviewStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No row exists for the requested id.
    #[error("review not found")]
    NotFound { id: ReviewId },

    /// The store rejected a row (CHECK / NOT NULL / unique violations).
    #[error("constraint violation: {message}")]
    Constraint { message: String },

    /// Connectivity or query failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // SQLSTATE class 23 = integrity constraint violation
        if let sqlx::Error::Database(db) = &err {
            if db.code().is_some_and(|code| code.starts_with("23")) {
                return StoreError::Constraint {
                    message: db.message().to_string(),
                };
            }
        }
        StoreError::Database(err)
    }
}

/// Entity-level operations over persisted reviews.
///
/// Writes assume the caller already ran `Review::validate`; the store only
/// enforces what its schema enforces.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// All reviews, newest id first.
    async fn list_all(&self) -> StoreResult<Vec<Review>>;

    async fn get_by_id(&self, id: ReviewId) -> StoreResult<Review>;

    /// Inserts one review and returns it with the store-assigned id.
    async fn create(&self, review: &Review) -> StoreResult<Review>;

    /// Inserts all reviews atomically and returns them in insertion order.
    ///
    /// An empty slice yields an empty vector without touching the store.
    async fn create_batch(&self, reviews: &[Review]) -> StoreResult<Vec<Review>>;

    /// Overwrites every non-id field of the review identified by `review.id`.
    async fn update(&self, review: &Review) -> StoreResult<Review>;

    async fn delete(&self, id: ReviewId) -> StoreResult<()>;

    /// Cheap connectivity check used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
