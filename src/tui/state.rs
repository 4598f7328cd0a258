use std::sync::{Arc, Mutex, MutexGuard};
use unicode_width::UnicodeWidthChar;

use crate::books::{BookDetail, BookSummary};
use crate::catalog::Shelf;
use crate::nav::Route;
use crate::rating::RatingInput;
use crate::review::{ReadingStatus, ReviewDraft, ReviewField};

/// Messages from background tasks and UI adapters to the event loop.
#[derive(Debug)]
pub enum UiEvent {
    Redraw,
    Navigate(Route),
    Notice(String),
    /// `generation` is the shelf load that produced it.
    ShelfLoaded {
        generation: u64,
        shelf: Shelf,
    },
    ResultsLoaded {
        query: String,
        books: Vec<BookSummary>,
    },
    DetailLoaded {
        id: String,
        result: Result<BookDetail, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Results,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Search,
    Categories,
    Shelf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFocus {
    Stars,
    Status,
    Review(ReviewField),
    Save,
}

impl DetailFocus {
    pub fn next(self) -> Self {
        match self {
            DetailFocus::Stars => DetailFocus::Status,
            DetailFocus::Status => DetailFocus::Review(ReviewField::ALL[0]),
            DetailFocus::Review(f) => {
                let i = ReviewField::ALL.iter().position(|x| *x == f).unwrap_or(0);
                match ReviewField::ALL.get(i + 1) {
                    Some(next) => DetailFocus::Review(*next),
                    None => DetailFocus::Save,
                }
            }
            DetailFocus::Save => DetailFocus::Stars,
        }
    }
}

/// The suggestion popup under the search box. Shared with the
/// autocomplete controller through [`super::bridge::TuiResults`].
#[derive(Debug, Clone, Default)]
pub struct SuggestionPane {
    pub items: Vec<BookSummary>,
    pub visible: bool,
    pub selected: Option<usize>,
}

impl SuggestionPane {
    pub fn move_selection(&mut self, down: bool) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        let n = self.items.len();
        self.selected = Some(match (self.selected, down) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        });
    }
}

pub type Shared<T> = Arc<Mutex<T>>;

pub fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone)]
pub struct DetailState {
    pub id: String,
    pub book: Option<BookDetail>,
    pub error: Option<String>,
    pub rating: RatingInput,
    /// Star under the keyboard cursor while the stars have focus.
    pub star_cursor: u8,
    pub status: Option<ReadingStatus>,
    pub status_cursor: usize,
    pub draft: ReviewDraft,
    pub focus: DetailFocus,
}

impl DetailState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            book: None,
            error: None,
            rating: RatingInput::new(0),
            star_cursor: 0,
            status: None,
            status_cursor: 0,
            draft: ReviewDraft::default(),
            focus: DetailFocus::Stars,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    pub query: String,
    pub books: Vec<BookSummary>,
    pub selected: usize,
    pub loading: bool,
}

pub fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if ch_w == 0 {
            out.push(ch);
            continue;
        }
        if width + ch_w > max {
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    out
}
