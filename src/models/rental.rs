//! Rental model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const ALREADY_RENTED: &str = "You have already rented this book";

/// Rental model from database
///
/// `user_id` and `book_id` are opaque; nothing checks that they point at an
/// existing user or book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    pub book_id: String,
    pub rental_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub returned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_active(&self) -> bool {
        !self.returned
    }
}

/// Rental insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub user_id: String,
    pub book_id: String,
    pub rental_date: DateTime<Utc>,
}

/// Create rental request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub user_id: String,
    pub book_id: String,
}

/// Return response with the updated rental
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReturnResponse {
    pub message: String,
    pub rental: Rental,
}
