//! PostgreSQL review store.

use super::{ReviewStore, StoreError, StoreResult};
use crate::domain::{Review, ReviewId};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, QueryBuilder};

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    body TEXT NOT NULL,
    rating DOUBLE PRECISION NOT NULL CHECK (rating >= 0 AND rating <= 5)
)";

const REVIEW_COLUMNS: &str = "id, name, email, body, rating";

/// Review store backed by a sqlx connection pool.
///
/// Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool, verifies connectivity and creates the `reviews` table if absent.
    pub async fn connect(
        options: PgConnectOptions,
        max_connections: u32,
    ) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.ping().await?;
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Idempotent; the table is never migrated afterwards.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn list_all(&self) -> StoreResult<Vec<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY id DESC");
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    async fn get_by_id(&self, id: ReviewId) -> StoreResult<Review> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, review: &Review) -> StoreResult<Review> {
        let sql = format!(
            "INSERT INTO reviews (name, email, body, rating) VALUES ($1, $2, $3, $4) \
             RETURNING {REVIEW_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Review>(&sql)
            .bind(&review.name)
            .bind(&review.email)
            .bind(&review.body)
            .bind(review.rating)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn create_batch(&self, reviews: &[Review]) -> StoreResult<Vec<Review>> {
        if reviews.is_empty() {
            return Ok(Vec::new());
        }

        // One statement: `VALUES ($1, $2, $3, $4), ($5, $6, $7, $8), ...`
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("INSERT INTO reviews (name, email, body, rating) ");
        builder.push_values(reviews, |mut row, review| {
            row.push_bind(review.name.as_str())
                .push_bind(review.email.as_str())
                .push_bind(review.body.as_str())
                .push_bind(review.rating);
        });
        builder.push(" RETURNING ");
        builder.push(REVIEW_COLUMNS);

        let mut created = builder
            .build_query_as::<Review>()
            .fetch_all(&self.pool)
            .await?;

        // SERIAL values are drawn in VALUES order; RETURNING order is not guaranteed.
        created.sort_by_key(|review| review.id);
        Ok(created)
    }

    async fn update(&self, review: &Review) -> StoreResult<Review> {
        let sql = format!(
            "UPDATE reviews SET name = $1, email = $2, body = $3, rating = $4 \
             WHERE id = $5 RETURNING {REVIEW_COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&sql)
            .bind(&review.name)
            .bind(&review.email)
            .bind(&review.body)
            .bind(review.rating)
            .bind(review.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id: review.id })
    }

    async fn delete(&self, id: ReviewId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
