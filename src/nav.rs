use std::fmt;

/// A screen the host can be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    BookDetail { id: String },
    SearchResults { query: String },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::BookDetail { id } => write!(f, "book-detail?id={id}"),
            Route::SearchResults { query } => write!(f, "search?q={query}"),
        }
    }
}

/// Navigation and blocking notices, implemented by whatever hosts the
/// screens.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
    fn notify(&self, notice: &str);
}
