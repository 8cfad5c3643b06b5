//! Data models for the book rental server

pub mod book;
pub mod rental;
pub mod user;

pub use book::{Book, BookPage, BookQuery, NewBook, UpdateBook};
pub use rental::{NewRental, Rental};
pub use user::{Claims, NewUser, User};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain `{"message": ...}` body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
