use thiserror::Error;
use tracing::{error, info};

use crate::books::{BookDetail, BookSearch, BooksError};

#[derive(Error, Debug)]
pub enum DetailError {
    #[error("No book id given. Please choose a valid book.")]
    MissingId,

    #[error("Book details not found.")]
    NotFound(String),

    #[error("Book details could not be loaded.")]
    Failed(#[from] BooksError),
}

/// Load the detail view for `id`. Each error's `Display` is the notice the
/// user sees.
pub async fn load_detail(books: &dyn BookSearch, id: Option<&str>) -> Result<BookDetail, DetailError> {
    let id = match id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => id,
        None => {
            error!("detail view opened without a book id");
            return Err(DetailError::MissingId);
        }
    };
    info!(%id, "loading book detail");
    match books.volume(id).await {
        Ok(Some(v)) => Ok(BookDetail::from(&v)),
        Ok(None) => {
            error!(%id, "book service has no such volume");
            Err(DetailError::NotFound(id.to_string()))
        }
        Err(e) => {
            error!(%id, kind = ?e.kind(), err = %e, "loading book detail failed");
            Err(DetailError::Failed(e))
        }
    }
}
