//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, rentals};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Rental API",
        version = "1.0.0",
        description = "Users, book catalog and rentals"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Books
        books::create_book,
        books::list_books,
        books::update_book,
        books::delete_book,
        // Rentals
        rentals::create_rental,
        rentals::return_rental,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            crate::models::user::AuthResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookPage,
            crate::models::book::BookQuery,
            crate::models::book::CreateBookForm,
            crate::models::book::UpdateBook,
            // Rentals
            crate::models::rental::Rental,
            crate::models::rental::CreateRentalRequest,
            crate::models::rental::ReturnResponse,
            // Common
            crate::models::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "books", description = "Catalog management"),
        (name = "rentals", description = "Rental management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
