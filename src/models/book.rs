//! Book (catalog) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Path of the uploaded cover, e.g. `uploads/1718000000000-dune.png`
    pub cover_image: Option<String>,
    /// Schema-only flag; nothing toggles it
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub cover_image: Option<String>,
}

/// Uploaded cover file, not yet written to the content store
#[derive(Debug, Clone)]
pub struct CoverUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields collected from a multipart create request
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub cover_image: Option<CoverUpload>,
}

/// Multipart body of `POST /books` (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateBookForm {
    title: String,
    author: String,
    genre: String,
    #[schema(rename = "coverImage", value_type = Option<String>, format = Binary)]
    cover_image: Option<Vec<u8>>,
}

/// Update request; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

/// Query parameters of the book listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Books per page (default: 10)
    pub limit: Option<i64>,
    /// Exact genre filter
    pub genre: Option<String>,
}

impl BookQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }

    /// Saturates instead of overflowing on huge `page` values
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// An empty `?genre=` lists every genre
    pub fn genre(&self) -> Option<String> {
        self.genre.clone().filter(|g| !g.is_empty())
    }
}

/// One page of the catalog
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total_pages: i64,
    pub current_page: i64,
}

/// ceil(count / limit)
pub fn total_pages(count: i64, limit: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    count / limit + i64::from(count % limit != 0)
}
