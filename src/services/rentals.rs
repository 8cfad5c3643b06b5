//! Rental lifecycle
//!
//! Each (user, book) pair moves None -> Active -> Returned, and may become
//! Active again with a new record once the previous one is returned.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::rental::{NewRental, Rental, ALREADY_RENTED},
    repository::Repository,
};

pub const RENTAL_NOT_FOUND: &str = "Rental not found";

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
}

impl RentalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Start a rental unless the pair already has an active one.
    ///
    /// The lookup and the insert are separate statements; a concurrent
    /// duplicate is still rejected by the store's partial unique index.
    pub async fn create_rental(&self, user_id: String, book_id: String) -> AppResult<Rental> {
        let active = self
            .repository
            .rentals
            .find_active(&user_id, &book_id)
            .await?
            .filter(Rental::is_active);

        if let Some(active) = active {
            tracing::debug!("Rental {} already active for user {} / book {}", active.id, user_id, book_id);
            return Err(AppError::Conflict(ALREADY_RENTED.to_string()));
        }

        let rental = self
            .repository
            .rentals
            .create(NewRental {
                user_id,
                book_id,
                rental_date: Utc::now(),
            })
            .await?;

        tracing::info!("Rental {} created for user {} / book {}", rental.id, rental.user_id, rental.book_id);
        Ok(rental)
    }

    /// Mark a rental returned.
    ///
    /// An already-returned rental is accepted again and gets a new return date.
    pub async fn return_rental(&self, id: &str) -> AppResult<Rental> {
        let id = Uuid::parse_str(id).map_err(|_| AppError::NotFound(RENTAL_NOT_FOUND.to_string()))?;

        let rental = self
            .repository
            .rentals
            .mark_returned(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(RENTAL_NOT_FOUND.to_string()))?;

        tracing::info!("Rental {} returned", rental.id);
        Ok(rental)
    }
}
