use crate::storage::ReviewStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared router state: the injected review store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReviewStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
