//! Postgres repository tests
//!
//! Need `DATABASE_URL` pointing at a disposable database:
//! `cargo test --test store_tests -- --ignored`

use book_rental_server::{
    models::{rental::NewRental, user::NewUser},
    repository::{
        rentals::PgRentalsRepository, users::PgUsersRepository, RentalsRepository,
        UsersRepository,
    },
    AppError,
};
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use uuid::Uuid;

async fn pool() -> Pool<Postgres> {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn new_rental(user_id: &str, book_id: &str) -> NewRental {
    NewRental {
        user_id: user_id.to_string(),
        book_id: book_id.to_string(),
        rental_date: Utc::now(),
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_second_active_rental_for_pair_is_conflict() {
    let repository = PgRentalsRepository::new(pool().await);
    let user_id = Uuid::new_v4().to_string();
    let book_id = Uuid::new_v4().to_string();

    repository
        .create(new_rental(&user_id, &book_id))
        .await
        .expect("first rental");

    // Skips the service's lookup, so only the partial unique index can refuse it
    let second = repository.create(new_rental(&user_id, &book_id)).await;

    assert!(
        matches!(second, Err(AppError::Conflict(msg)) if msg == "You have already rented this book")
    );
}

#[tokio::test]
#[ignore]
async fn test_pair_can_rent_again_after_return() {
    let repository = PgRentalsRepository::new(pool().await);
    let user_id = Uuid::new_v4().to_string();
    let book_id = Uuid::new_v4().to_string();

    let first = repository
        .create(new_rental(&user_id, &book_id))
        .await
        .expect("first rental");
    repository
        .mark_returned(first.id, Utc::now())
        .await
        .expect("return")
        .expect("rental exists");

    let second = repository
        .create(new_rental(&user_id, &book_id))
        .await
        .expect("second rental");
    assert_ne!(first.id, second.id);
    assert!(second.is_active());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_is_conflict() {
    let repository = PgUsersRepository::new(pool().await);
    let email = format!("{}@example.com", Uuid::new_v4());
    let new_user = || NewUser {
        name: "Ada".to_string(),
        email: email.clone(),
        password_hash: "not-a-real-hash".to_string(),
    };

    repository.create(new_user()).await.expect("first user");
    let second = repository.create(new_user()).await;

    assert!(matches!(second, Err(AppError::Conflict(msg)) if msg == "User already exists"));
}
