//! Repository layer for database operations

pub mod books;
pub mod rentals;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};

pub use books::BooksRepository;
pub use rentals::RentalsRepository;
pub use users::UsersRepository;

/// Store handle shared by all services
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub users: Arc<dyn UsersRepository>,
    pub books: Arc<dyn BooksRepository>,
    pub rentals: Arc<dyn RentalsRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::PgUsersRepository::new(pool.clone())),
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            rentals: Arc::new(rentals::PgRentalsRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Assemble a repository from arbitrary implementations, without a pool
    pub fn from_parts(
        users: Arc<dyn UsersRepository>,
        books: Arc<dyn BooksRepository>,
        rentals: Arc<dyn RentalsRepository>,
    ) -> Self {
        Self {
            pool: None,
            users,
            books,
            rentals,
        }
    }

    /// Round-trip to the database, if there is one
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
        }
        Ok(())
    }
}
