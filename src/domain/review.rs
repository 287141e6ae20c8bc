use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Store-assigned identifier of a review (`SERIAL` in PostgreSQL).
pub type ReviewId = i32;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Upper bound on the number of reviews accepted by one batch insert.
///
/// Each row binds four parameters, so this keeps a single statement far below
/// PostgreSQL's 65535 bind-parameter limit.
pub const MAX_BATCH_LEN: usize = 1000;

/// A customer review.
///
/// `id` is assigned by the store; on create requests it may be omitted or null
/// and is ignored if present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema, sqlx::FromRow)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub id: ReviewId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub rating: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<ReviewId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ReviewId>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("rating must be between 0 and 5, got {rating}")]
    RatingOutOfRange { rating: f64 },
}

impl Review {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            body: body.into(),
            rating,
        }
    }

    /// Checks the invariant every persisted review must satisfy.
    ///
    /// Fields are checked in declaration order and the first violation wins.
    /// NaN ratings are rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("body", &self.body),
        ] {
            if value.is_empty() {
                return Err(ValidationError::EmptyField { field });
            }
        }

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange {
                rating: self.rating,
            });
        }

        Ok(())
    }

    /// Same review with a different id.
    pub fn with_id(mut self, id: ReviewId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_review_passes() {
        let review = Review::new("Alice", "a@x.com", "Great", 4.5);
        assert!(review.validate().is_ok());
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        assert!(Review::new("a", "b", "c", 0.0).validate().is_ok());
        assert!(Review::new("a", "b", "c", 5.0).validate().is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let cases = [
            (Review::new("", "a@x.com", "x", 3.0), "name"),
            (Review::new("Bob", "", "x", 3.0), "email"),
            (Review::new("Bob", "b@x.com", "", 3.0), "body"),
        ];
        for (review, expected) in cases {
            assert_eq!(
                review.validate(),
                Err(ValidationError::EmptyField { field: expected })
            );
        }
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        for rating in [-0.1, 5.01, 7.0, f64::NAN] {
            let err = Review::new("Bob", "b@x.com", "Ok", rating)
                .validate()
                .unwrap_err();
            assert!(matches!(err, ValidationError::RatingOutOfRange { .. }));
        }
    }

    #[test]
    fn test_id_defaults_to_zero_when_omitted() {
        let review: Review = serde_json::from_str(
            r#"{"name":"Alice","email":"a@x.com","body":"Great","rating":4.5}"#,
        )
        .unwrap();
        assert_eq!(review.id, 0);
        assert_eq!(review, Review::new("Alice", "a@x.com", "Great", 4.5));
    }

    #[test]
    fn test_null_id_is_treated_as_zero() {
        let review: Review = serde_json::from_str(
            r#"{"id":null,"name":"Alice","email":"a@x.com","body":"Great","rating":4.5}"#,
        )
        .unwrap();
        assert_eq!(review.id, 0);

        let review: Review = serde_json::from_str(
            r#"{"id":7,"name":"Alice","email":"a@x.com","body":"Great","rating":4.5}"#,
        )
        .unwrap();
        assert_eq!(review.id, 7);
    }

    #[test]
    fn test_validation_message() {
        let err = Review::new("", "a@x.com", "x", 3.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "name must not be empty");
    }
}
