use crate::domain::{Review, ReviewId, MAX_BATCH_LEN};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, ErrorResponse, MessageResponse};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

fn parse_id(raw: &str) -> Result<ReviewId, ApiError> {
    raw.parse::<ReviewId>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Decodes a JSON body regardless of the request's `Content-Type`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "All reviews, newest first", body = [Review]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_reviews_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = state.store.list_all().await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = Review,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid JSON or review data", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_review_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review: Review = decode_body(&body)?;
    review.validate()?;

    let created = state.store.create(&review).await?;
    tracing::info!(id = created.id, "review created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Validates every item up front, then inserts the whole batch in one statement.
#[utoipa::path(
    post,
    path = "/api/reviews/batch",
    request_body = [Review],
    responses(
        (status = 201, description = "Reviews created, in request order", body = [Review]),
        (status = 400, description = "Invalid JSON, invalid item or batch too large", body = ErrorResponse),
        (status = 500, description = "Store failure, nothing was inserted", body = ErrorResponse)
    )
)]
pub async fn create_review_batch_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Vec<Review>>), ApiError> {
    let reviews: Vec<Review> = decode_body(&body)?;

    if reviews.len() > MAX_BATCH_LEN {
        return Err(ApiError::BatchTooLarge { len: reviews.len() });
    }
    for (index, review) in reviews.iter().enumerate() {
        review
            .validate()
            .map_err(|source| ApiError::InvalidBatchItem { index, source })?;
    }

    let created = state.store.create_batch(&reviews).await?;
    tracing::info!(count = created.len(), "review batch created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    params(
        ("id" = i32, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No review with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    let id = parse_id(&id)?;
    let review = state.store.get_by_id(id).await?;
    Ok(Json(review))
}

/// The id in the path wins over any id in the body.
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    params(
        ("id" = i32, Path, description = "Review id")
    ),
    request_body = Review,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Invalid id, JSON or review data", body = ErrorResponse),
        (status = 404, description = "No review with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Review>, ApiError> {
    let id = parse_id(&id)?;
    let review: Review = decode_body(&body)?;
    let review = review.with_id(id);
    review.validate()?;

    let updated = state.store.update(&review).await?;
    tracing::info!(id, "review updated");
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(
        ("id" = i32, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No review with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    tracing::info!(id, "review deleted");
    Ok(Json(MessageResponse {
        message: "review deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id(""), Err(ApiError::InvalidId(_))));
    }

    #[test]
    fn test_decode_body_reports_syntax_errors() {
        let err = decode_body::<Review>(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
        assert!(err.to_string().starts_with("invalid request body"));
    }
}
