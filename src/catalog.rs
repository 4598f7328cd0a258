use tracing::{info, warn};

use crate::books::{BookSearch, BookSummary, OrderBy, SearchRequest, Volume, search_summaries};
use crate::config::CatalogConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { slug: "fiction", name: "Fiction" },
    Category { slug: "classics", name: "Classics" },
    Category { slug: "history", name: "History" },
    Category { slug: "science", name: "Science" },
    Category { slug: "fantasy", name: "Fantasy" },
    Category { slug: "biography", name: "Biography" },
    Category { slug: "poetry", name: "Poetry" },
    Category { slug: "philosophy", name: "Philosophy" },
];

pub const TRENDING_HEADING: &str = "Trending Books";
pub const TRENDING_EMPTY: &str = "No trending books found.";
pub const TRENDING_FAILED: &str = "Trending books could not be loaded.";

pub fn find_category(slug: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|c| c.slug.eq_ignore_ascii_case(slug))
}

pub fn subject_query(slug: &str) -> String {
    format!("subject:{slug}")
}

/// A heading plus the books under it; `message` replaces the list when it
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    pub heading: String,
    pub books: Vec<BookSummary>,
    pub message: Option<String>,
}

/// Books for one category. Failures look the same as an empty category.
pub async fn browse(books: &dyn BookSearch, category: &Category, cfg: &CatalogConfig) -> Shelf {
    info!(category = category.slug, "browsing category");
    let req = SearchRequest::new(subject_query(category.slug), cfg.shelf_results);
    let found = search_summaries(books, &req).await;
    let message = found.is_empty().then(|| {
        format!("No books found in the \"{}\" category.", category.name)
    });
    Shelf {
        heading: format!("{} Books", category.name),
        books: found,
        message,
    }
}

/// The shelf shown before any category is picked.
pub async fn trending(books: &dyn BookSearch, cfg: &CatalogConfig) -> Shelf {
    let req = SearchRequest::new(subject_query(&cfg.default_category), cfg.shelf_results)
        .order_by(OrderBy::Relevance);
    let (found, message) = match books.search(&req).await {
        Ok(volumes) if volumes.is_empty() => (Vec::new(), Some(TRENDING_EMPTY.to_string())),
        Ok(volumes) => (volumes.iter().map(Volume::summarize).collect(), None),
        Err(e) => {
            warn!(kind = ?e.kind(), err = %e, "loading trending shelf failed");
            (Vec::new(), Some(TRENDING_FAILED.to_string()))
        }
    };
    Shelf {
        heading: TRENDING_HEADING.to_string(),
        books: found,
        message,
    }
}
