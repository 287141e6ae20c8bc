pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod reviews;
}

pub use error::ApiError;
pub use router::{create_router, with_http_layers, ApiDoc};
pub use types::AppState;
