//! Rentals repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{conflict_on_unique, AppResult},
    models::rental::{NewRental, Rental, ALREADY_RENTED},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalsRepository: Send + Sync {
    /// The not-yet-returned rental for this pair, if any
    async fn find_active(&self, user_id: &str, book_id: &str) -> AppResult<Option<Rental>>;

    async fn create(&self, rental: NewRental) -> AppResult<Rental>;

    /// Sets `returned` and `return_date` whatever the current state.
    /// Returns `None` when no rental has this id.
    async fn mark_returned(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Rental>>;
}

#[derive(Clone)]
pub struct PgRentalsRepository {
    pool: Pool<Postgres>,
}

impl PgRentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalsRepository for PgRentalsRepository {
    async fn find_active(&self, user_id: &str, book_id: &str) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE user_id = $1 AND book_id = $2 AND NOT returned
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn create(&self, rental: NewRental) -> AppResult<Rental> {
        let now = Utc::now();

        sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (id, user_id, book_id, rental_date, return_date, returned, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL, FALSE, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&rental.user_id)
        .bind(&rental.book_id)
        .bind(rental.rental_date)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, ALREADY_RENTED))
    }

    async fn mark_returned(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET returned = TRUE, return_date = $2, updated_at = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }
}
