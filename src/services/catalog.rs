//! Catalog management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{total_pages, Book, BookForm, BookPage, BookQuery, NewBook, UpdateBook},
    repository::Repository,
    services::storage::CoverStorage,
};

pub const BOOK_NOT_FOUND: &str = "Book not found";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    storage: CoverStorage,
}

impl CatalogService {
    pub fn new(repository: Repository, storage: CoverStorage) -> Self {
        Self { repository, storage }
    }

    /// Create a book, storing the cover first when one was uploaded
    pub async fn create_book(&self, form: BookForm) -> AppResult<Book> {
        let title = required(form.title, "title")?;
        let author = required(form.author, "author")?;
        let genre = required(form.genre, "genre")?;

        let cover_image = match form.cover_image {
            Some(upload) => Some(self.storage.store(&upload.file_name, &upload.bytes).await?),
            None => None,
        };

        let book = self
            .repository
            .books
            .create(NewBook {
                title,
                author,
                genre,
                cover_image,
            })
            .await?;

        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(book)
    }

    /// List one page of books, optionally filtered by exact genre
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<BookPage> {
        let limit = query.limit();

        let books = self
            .repository
            .books
            .list(query.genre(), limit, query.offset())
            .await?;
        let count = self.repository.books.count(query.genre()).await?;

        Ok(BookPage {
            books,
            total_pages: total_pages(count, limit),
            current_page: query.page(),
        })
    }

    pub async fn update_book(&self, id: &str, changes: UpdateBook) -> AppResult<Book> {
        let id = parse_id(id)?;
        self.repository
            .books
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
        }

        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

/// Ids that are not UUIDs cannot name any book
fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
}
