//! API handlers for the book rental REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;
pub mod rentals;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(&state.config.uploads.dir);
    let body_limit = DefaultBodyLimit::max(state.config.uploads.max_body_bytes);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Catalog
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", put(books::update_book).delete(books::delete_book))
        // Rentals
        .route("/rentals", post(rentals::create_rental))
        .route("/rentals/:id/return", put(rentals::return_rental))
        // Uploaded cover images
        .nest_service("/uploads", uploads)
        .layer(body_limit)
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        config::AppConfig,
        models::{book::Book, rental::Rental},
        repository::{
            books::MockBooksRepository, rentals::MockRentalsRepository, users::MockUsersRepository,
            Repository,
        },
        services::Services,
    };

    fn app(users: MockUsersRepository, books: MockBooksRepository, rentals: MockRentalsRepository) -> Router {
        let mut config = AppConfig::default();
        config.uploads.dir = std::env::temp_dir().join(format!("api-uploads-{}", Uuid::new_v4()));

        let repository = Repository::from_parts(Arc::new(users), Arc::new(books), Arc::new(rentals));
        let services = Services::new(repository, config.auth.clone(), &config.uploads);

        create_router(AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }

    fn books_only(books: MockBooksRepository) -> Router {
        app(MockUsersRepository::new(), books, MockRentalsRepository::new())
    }

    fn rentals_only(rentals: MockRentalsRepository) -> Router {
        app(MockUsersRepository::new(), MockBooksRepository::new(), rentals)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn book(title: &str, genre: &str) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: "Herbert".to_string(),
            genre: genre.to_string(),
            cover_image: None,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rental(user_id: &str, book_id: &str) -> Rental {
        let now = Utc::now();
        Rental {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            rental_date: now,
            return_date: None,
            returned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = books_only(MockBooksRepository::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_register_returns_created_with_token() {
        let mut users = MockUsersRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|new_user| {
            Ok(crate::models::user::User {
                id: Uuid::new_v4(),
                name: new_user.name,
                email: new_user.email,
                password: new_user.password_hash,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let response = app(users, MockBooksRepository::new(), MockRentalsRepository::new())
            .oneshot(json_request(
                Method::POST,
                "/register",
                json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["token"].is_string());
        assert!(body["userId"].is_string());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_bad_request() {
        let mut users = MockUsersRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let response = app(users, MockBooksRepository::new(), MockRentalsRepository::new())
            .oneshot(json_request(
                Method::POST,
                "/login",
                json!({"email": "ghost@example.com", "password": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid credentials");
    }

    const BOUNDARY: &str = "XBOUNDARYX";

    /// Dune's text fields followed by `extra` parts, as a multipart POST /books
    fn dune_multipart(extra: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nDune\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"author\"\r\n\r\nHerbert\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"genre\"\r\n\r\nSciFi\r\n\
             {extra}--{b}--\r\n",
            b = BOUNDARY,
            extra = extra
        );
        Request::post("/books")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_book_from_multipart() {
        let mut books = MockBooksRepository::new();
        books
            .expect_create()
            .withf(|b| b.title == "Dune" && b.author == "Herbert" && b.genre == "SciFi" && b.cover_image.is_none())
            .times(1)
            .returning(|b| Ok(book(&b.title, &b.genre)));

        let response = books_only(books).oneshot(dune_multipart("")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["_id"].is_string());
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["available"], true);
        assert!(body["coverImage"].is_null());
    }

    #[tokio::test]
    async fn test_create_book_with_cover_image_part() {
        let mut books = MockBooksRepository::new();
        books
            .expect_create()
            .withf(|b| {
                b.title == "Dune" && b.cover_image.as_deref().is_some_and(|p| p.ends_with("-dune.png"))
            })
            .times(1)
            .returning(|b| {
                let mut created = book(&b.title, &b.genre);
                created.cover_image = b.cover_image;
                Ok(created)
            });

        let cover = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"coverImage\"; filename=\"dune.png\"\r\n\
             Content-Type: image/png\r\n\r\nPNGDATA\r\n",
            b = BOUNDARY
        );
        let response = books_only(books).oneshot(dune_multipart(&cover)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let path = body["coverImage"].as_str().expect("cover path in response");
        assert!(path.ends_with("-dune.png"));
        assert_eq!(tokio::fs::read(path).await.unwrap(), b"PNGDATA");

        tokio::fs::remove_file(path).await.unwrap();
    }

    #[tokio::test]
    async fn test_cover_part_without_file_name_is_dropped() {
        let mut books = MockBooksRepository::new();
        books
            .expect_create()
            .withf(|b| b.title == "Dune" && b.cover_image.is_none())
            .times(1)
            .returning(|b| Ok(book(&b.title, &b.genre)));

        let empty_cover = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"coverImage\"; filename=\"\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\r\n",
            b = BOUNDARY
        );
        let response = books_only(books).oneshot(dune_multipart(&empty_cover)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_json(response).await["coverImage"].is_null());
    }

    #[tokio::test]
    async fn test_list_books_page_shape() {
        let mut books = MockBooksRepository::new();
        books
            .expect_list()
            .withf(|genre, limit, offset| genre.as_deref() == Some("Fantasy") && *limit == 10 && *offset == 0)
            .returning(|_, _, _| Ok(vec![book("The Hobbit", "Fantasy")]));
        books.expect_count().returning(|_| Ok(11));

        let response = books_only(books)
            .oneshot(Request::get("/books?genre=Fantasy").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["books"][0]["genre"], "Fantasy");
    }

    #[tokio::test]
    async fn test_empty_genre_lists_every_genre() {
        let mut books = MockBooksRepository::new();
        books
            .expect_list()
            .withf(|genre, limit, offset| genre.is_none() && *limit == 10 && *offset == 0)
            .times(1)
            .returning(|_, _, _| Ok(vec![book("Dune", "SciFi"), book("The Hobbit", "Fantasy")]));
        books
            .expect_count()
            .withf(|genre| genre.is_none())
            .times(1)
            .returning(|_| Ok(2));

        let response = books_only(books)
            .oneshot(Request::get("/books?genre=").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["books"].as_array().unwrap().len(), 2);
        assert_eq!(body["totalPages"], 1);
    }

    #[tokio::test]
    async fn test_update_missing_book_is_not_found() {
        let mut books = MockBooksRepository::new();
        books.expect_update().returning(|_, _| Ok(None));

        let response = books_only(books)
            .oneshot(json_request(
                Method::PUT,
                &format!("/books/{}", Uuid::new_v4()),
                json!({"title": "Dune", "author": "Herbert", "genre": "SciFi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Book not found");
    }

    #[tokio::test]
    async fn test_delete_book_message() {
        let mut books = MockBooksRepository::new();
        books.expect_delete().returning(|_| Ok(true));

        let response = books_only(books)
            .oneshot(
                Request::delete(format!("/books/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Book deleted successfully");
    }

    #[tokio::test]
    async fn test_duplicate_rental_is_bad_request() {
        let mut rentals = MockRentalsRepository::new();
        rentals
            .expect_find_active()
            .returning(|u, b| Ok(Some(rental(u, b))));

        let response = rentals_only(rentals)
            .oneshot(json_request(
                Method::POST,
                "/rentals",
                json!({"userId": "u1", "bookId": "b1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "You have already rented this book");
    }

    #[tokio::test]
    async fn test_create_rental_created() {
        let mut rentals = MockRentalsRepository::new();
        rentals.expect_find_active().returning(|_, _| Ok(None));
        rentals
            .expect_create()
            .returning(|r| Ok(rental(&r.user_id, &r.book_id)));

        let response = rentals_only(rentals)
            .oneshot(json_request(
                Method::POST,
                "/rentals",
                json!({"userId": "u1", "bookId": "b1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["returned"], false);
        assert!(body["returnDate"].is_null());
    }

    #[tokio::test]
    async fn test_return_rental_response() {
        let mut rentals = MockRentalsRepository::new();
        rentals.expect_mark_returned().returning(|id, at| {
            let mut returned = rental("u1", "b1");
            returned.id = id;
            returned.returned = true;
            returned.return_date = Some(at);
            Ok(Some(returned))
        });

        let response = rentals_only(rentals)
            .oneshot(
                Request::put(format!("/rentals/{}/return", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Book returned successfully");
        assert_eq!(body["rental"]["returned"], true);
        assert!(body["rental"]["returnDate"].is_string());
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_server_error() {
        let mut rentals = MockRentalsRepository::new();
        rentals
            .expect_mark_returned()
            .returning(|_, _| Err(crate::error::AppError::Database(sqlx::Error::PoolTimedOut)));

        let response = rentals_only(rentals)
            .oneshot(
                Request::put(format!("/rentals/{}/return", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Server Error");
    }
}
