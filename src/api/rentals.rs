//! Rental endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::rental::{CreateRentalRequest, Rental, ReturnResponse},
};

/// Rent a book
#[utoipa::path(
    post,
    path = "/rentals",
    tag = "rentals",
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental created", body = Rental),
        (status = 400, description = "Book already rented by this user", body = crate::error::ErrorResponse),
        (status = 500, description = "Server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateRentalRequest>,
) -> AppResult<(StatusCode, Json<Rental>)> {
    let rental = state
        .services
        .rentals
        .create_rental(request.user_id, request.book_id)
        .await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

/// Return a rented book
#[utoipa::path(
    put,
    path = "/rentals/{id}/return",
    tag = "rentals",
    params(
        ("id" = String, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Rental not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_rental(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReturnResponse>> {
    let rental = state.services.rentals.return_rental(&id).await?;
    Ok(Json(ReturnResponse {
        message: "Book returned successfully".to_string(),
        rental,
    }))
}
