pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::{Review, ReviewId, ValidationError};
pub use infra::config::Config;
pub use storage::{MemoryReviewStore, PgReviewStore, ReviewStore, StoreError};
