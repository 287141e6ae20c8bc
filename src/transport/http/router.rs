use crate::domain::Review;
use crate::transport::http::handlers::{health, reviews};
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse, MessageResponse};
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        reviews::list_reviews_handler,
        reviews::create_review_handler,
        reviews::create_review_batch_handler,
        reviews::get_review_handler,
        reviews::update_review_handler,
        reviews::delete_review_handler
    ),
    components(schemas(Review, ErrorResponse, MessageResponse, HealthResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/reviews",
            get(reviews::list_reviews_handler).post(reviews::create_review_handler),
        )
        .route("/api/reviews/batch", post(reviews::create_review_batch_handler))
        .route(
            "/api/reviews/:id",
            get(reviews::get_review_handler)
                .put(reviews::update_review_handler)
                .delete(reviews::delete_review_handler),
        )
        .with_state(app_state)
}

/// Browser-facing layers: permissive CORS and request tracing.
pub fn with_http_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(300));

    router.layer(cors).layer(TraceLayer::new_for_http())
}
