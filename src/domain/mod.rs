//! Domain types for customer reviews.

pub mod review;

pub use review::{Review, ReviewId, ValidationError, MAX_BATCH_LEN, MAX_RATING, MIN_RATING};
