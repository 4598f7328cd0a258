use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};

use super::bridge::{TuiNavigator, TuiResults, TuiSearchField};
use super::state::{
    DetailFocus, DetailState, HomeFocus, ResultsState, Screen, Shared, Status, SuggestionPane,
    UiEvent, lock,
};
use super::theme::Theme;
use crate::autocomplete::AutocompleteController;
use crate::books::{BookSearch, BookSummary, SearchRequest, search_summaries};
use crate::catalog::{self, CATEGORIES, Shelf};
use crate::config::AppConfig;
use crate::detail::load_detail;
use crate::nav::Route;
use crate::rating::MAX_STARS;
use crate::review::ReadingStatus;

pub struct TuiApp {
    pub title: String,
    pub cfg: AppConfig,
    pub theme: Theme,
    pub(crate) books: Arc<dyn BookSearch>,
    pub(crate) controller: AutocompleteController,
    pub search_text: Shared<String>,
    pub pane: Shared<SuggestionPane>,
    pub(crate) inbox_tx: UnboundedSender<UiEvent>,
    pub(crate) inbox_rx: UnboundedReceiver<UiEvent>,
    pub screen: Screen,
    pub status: Status,
    pub home_focus: HomeFocus,
    pub category_index: usize,
    pub shelf: Option<Shelf>,
    pub shelf_index: usize,
    /// Bumped per shelf load; only the latest load may fill the shelf.
    pub shelf_generation: u64,
    pub results: ResultsState,
    pub detail: Option<DetailState>,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(title: impl Into<String>, cfg: AppConfig, books: Arc<dyn BookSearch>) -> Self {
        let (tx, rx) = unbounded_channel();
        let search_text = Arc::new(Mutex::new(String::new()));
        let pane = Arc::new(Mutex::new(SuggestionPane::default()));
        let controller = AutocompleteController::new(
            Arc::new(TuiSearchField {
                text: search_text.clone(),
                tx: tx.clone(),
            }),
            Arc::new(TuiResults {
                pane: pane.clone(),
                tx: tx.clone(),
            }),
            Arc::new(TuiNavigator { tx: tx.clone() }),
            books.clone(),
            cfg.autocomplete.clone(),
        );
        let theme = Theme::by_name(&cfg.theme);
        Self {
            title: title.into(),
            cfg,
            theme,
            books,
            controller,
            search_text,
            pane,
            inbox_tx: tx,
            inbox_rx: rx,
            screen: Screen::Home,
            status: Status::Idle,
            home_focus: HomeFocus::Search,
            category_index: 0,
            shelf: None,
            shelf_index: 0,
            shelf_generation: 0,
            results: ResultsState::default(),
            detail: None,
            notice: None,
            should_quit: false,
        }
    }

    pub fn sender(&self) -> UnboundedSender<UiEvent> {
        self.inbox_tx.clone()
    }

    pub fn load_trending(&mut self) {
        self.status = Status::Loading;
        self.shelf_generation += 1;
        let generation = self.shelf_generation;
        let books = self.books.clone();
        let cfg = self.cfg.catalog.clone();
        let tx = self.sender();
        tokio::spawn(async move {
            let shelf = catalog::trending(books.as_ref(), &cfg).await;
            tx.send(UiEvent::ShelfLoaded { generation, shelf }).ok();
        });
    }

    fn load_category(&mut self) {
        let Some(category) = CATEGORIES.get(self.category_index) else {
            return;
        };
        self.status = Status::Loading;
        self.shelf_generation += 1;
        let generation = self.shelf_generation;
        let books = self.books.clone();
        let cfg = self.cfg.catalog.clone();
        let tx = self.sender();
        tokio::spawn(async move {
            let shelf = catalog::browse(books.as_ref(), category, &cfg).await;
            tx.send(UiEvent::ShelfLoaded { generation, shelf }).ok();
        });
    }

    pub fn handle_event(&mut self, ev: UiEvent) {
        match ev {
            UiEvent::Redraw => {}
            UiEvent::Notice(msg) => self.notice = Some(msg),
            UiEvent::Navigate(route) => self.open(route),
            UiEvent::ShelfLoaded { generation, shelf } => {
                if generation != self.shelf_generation {
                    debug!(
                        generation,
                        latest = self.shelf_generation,
                        heading = %shelf.heading,
                        "dropping stale shelf"
                    );
                    return;
                }
                self.status = Status::Idle;
                self.shelf_index = 0;
                self.shelf = Some(shelf);
            }
            UiEvent::ResultsLoaded { query, books } => {
                if self.screen != Screen::Results || self.results.query != query {
                    debug!(%query, "ignoring results for a screen that was left");
                    return;
                }
                self.status = Status::Idle;
                self.results.loading = false;
                self.results.selected = 0;
                self.results.books = books;
            }
            UiEvent::DetailLoaded { id, result } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.id == id) else {
                    debug!(%id, "ignoring detail for a screen that was left");
                    return;
                };
                match result {
                    Ok(book) => {
                        self.status = Status::Idle;
                        detail.book = Some(book);
                    }
                    Err(msg) => {
                        self.status = Status::Error;
                        detail.error = Some(msg.clone());
                        self.notice = Some(msg);
                    }
                }
            }
        }
    }

    /// Switch screens and start whatever load the new screen needs.
    pub fn open(&mut self, route: Route) {
        info!(%route, "navigating");
        match route {
            Route::BookDetail { id } => {
                self.screen = Screen::Detail;
                self.status = Status::Loading;
                self.detail = Some(DetailState::new(id.clone()));
                let books = self.books.clone();
                let tx = self.sender();
                tokio::spawn(async move {
                    let result = load_detail(books.as_ref(), Some(&id))
                        .await
                        .map_err(|e| e.to_string());
                    tx.send(UiEvent::DetailLoaded { id, result }).ok();
                });
            }
            Route::SearchResults { query } => {
                self.screen = Screen::Results;
                self.status = Status::Loading;
                self.results = ResultsState {
                    query: query.clone(),
                    loading: true,
                    ..ResultsState::default()
                };
                let books = self.books.clone();
                let limit = self.cfg.catalog.search_results;
                let tx = self.sender();
                tokio::spawn(async move {
                    let req = SearchRequest::new(query.clone(), limit);
                    let books = search_summaries(books.as_ref(), &req).await;
                    tx.send(UiEvent::ResultsLoaded { query, books }).ok();
                });
            }
        }
    }

    fn go_home(&mut self) {
        self.screen = Screen::Home;
        self.status = Status::Idle;
        self.detail = None;
        self.set_home_focus(HomeFocus::Search);
    }

    fn set_home_focus(&mut self, focus: HomeFocus) {
        if self.home_focus == HomeFocus::Search && focus != HomeFocus::Search {
            self.controller.on_blur();
        } else if self.home_focus != HomeFocus::Search && focus == HomeFocus::Search {
            self.controller.on_focus();
        }
        self.home_focus = focus;
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }
        if k.code != KeyCode::Enter {
            self.notice = None;
        }
        match self.screen {
            Screen::Home => self.handle_home_key(k),
            Screen::Results => self.handle_results_key(k),
            Screen::Detail => self.handle_detail_key(k),
        }
    }

    fn handle_home_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Tab => {
                let next = match self.home_focus {
                    HomeFocus::Search => HomeFocus::Categories,
                    HomeFocus::Categories => HomeFocus::Shelf,
                    HomeFocus::Shelf => HomeFocus::Search,
                };
                self.set_home_focus(next);
                return;
            }
            KeyCode::BackTab => {
                let prev = match self.home_focus {
                    HomeFocus::Search => HomeFocus::Shelf,
                    HomeFocus::Categories => HomeFocus::Search,
                    HomeFocus::Shelf => HomeFocus::Categories,
                };
                self.set_home_focus(prev);
                return;
            }
            _ => {}
        }
        match self.home_focus {
            HomeFocus::Search => self.handle_search_key(k),
            HomeFocus::Categories => match k.code {
                KeyCode::Left => {
                    self.category_index =
                        (self.category_index + CATEGORIES.len() - 1) % CATEGORIES.len();
                }
                KeyCode::Right => {
                    self.category_index = (self.category_index + 1) % CATEGORIES.len();
                }
                KeyCode::Enter => self.load_category(),
                _ => {}
            },
            HomeFocus::Shelf => {
                let len = self.shelf.as_ref().map(|s| s.books.len()).unwrap_or(0);
                match k.code {
                    KeyCode::Up => self.shelf_index = self.shelf_index.saturating_sub(1),
                    KeyCode::Down if self.shelf_index + 1 < len => self.shelf_index += 1,
                    KeyCode::Enter => {
                        if let Some(book) = self
                            .shelf
                            .as_ref()
                            .and_then(|s| s.books.get(self.shelf_index))
                        {
                            let id = book.id.clone();
                            self.open(Route::BookDetail { id });
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_search_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Char(c) => {
                lock(&self.search_text).push(c);
                self.controller.on_input();
            }
            KeyCode::Backspace => {
                let changed = lock(&self.search_text).pop().is_some();
                if changed {
                    self.controller.on_input();
                }
            }
            KeyCode::Up | KeyCode::Down => {
                let mut pane = lock(&self.pane);
                if pane.visible {
                    pane.move_selection(k.code == KeyCode::Down);
                }
            }
            KeyCode::Enter => {
                let picked = {
                    let pane = lock(&self.pane);
                    if pane.visible { pane.selected } else { None }
                };
                match picked {
                    Some(i) => {
                        self.controller.select(i);
                    }
                    None => self.controller.submit(),
                }
            }
            KeyCode::Esc => {
                lock(&self.pane).visible = false;
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Esc => self.go_home(),
            KeyCode::Up => self.results.selected = self.results.selected.saturating_sub(1),
            KeyCode::Down if self.results.selected + 1 < self.results.books.len() => {
                self.results.selected += 1
            }
            KeyCode::Enter => {
                if let Some(book) = self.results.books.get(self.results.selected) {
                    let id = book.id.clone();
                    self.open(Route::BookDetail { id });
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, k: KeyEvent) {
        if k.code == KeyCode::Esc {
            self.go_home();
            return;
        }
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        if k.code == KeyCode::Tab {
            if detail.focus == DetailFocus::Stars {
                detail.rating.leave();
            }
            detail.focus = detail.focus.next();
            return;
        }
        let notice = match detail.focus {
            DetailFocus::Stars => {
                match k.code {
                    KeyCode::Left => {
                        detail.star_cursor = detail.star_cursor.saturating_sub(1).max(1);
                        detail.rating.hover(detail.star_cursor);
                    }
                    KeyCode::Right => {
                        detail.star_cursor = (detail.star_cursor + 1).min(MAX_STARS);
                        detail.rating.hover(detail.star_cursor);
                    }
                    KeyCode::Enter | KeyCode::Char(' ') if detail.star_cursor > 0 => {
                        detail.rating.click(detail.star_cursor);
                        detail.draft.rating = detail.rating.committed();
                    }
                    KeyCode::Char(c @ '1'..='5') => {
                        let v = c as u8 - b'0';
                        detail.star_cursor = v;
                        detail.rating.click(v);
                        detail.draft.rating = detail.rating.committed();
                    }
                    _ => {}
                }
                None
            }
            DetailFocus::Status => match k.code {
                KeyCode::Left => {
                    detail.status_cursor = detail.status_cursor.saturating_sub(1);
                    None
                }
                KeyCode::Right => {
                    detail.status_cursor =
                        (detail.status_cursor + 1).min(ReadingStatus::ALL.len() - 1);
                    None
                }
                KeyCode::Enter => {
                    let status = ReadingStatus::ALL[detail.status_cursor];
                    detail.status = Some(status);
                    Some(status.select(&detail.id))
                }
                _ => None,
            },
            DetailFocus::Review(field) => {
                match k.code {
                    KeyCode::Char(c) => detail.draft.field_mut(field).push(c),
                    KeyCode::Enter => detail.draft.field_mut(field).push('\n'),
                    KeyCode::Backspace => {
                        detail.draft.field_mut(field).pop();
                    }
                    _ => {}
                }
                None
            }
            DetailFocus::Save => match k.code {
                KeyCode::Enter => Some(detail.draft.save(&detail.id)),
                _ => None,
            },
        };
        if notice.is_some() {
            self.notice = notice;
        }
    }

    pub fn suggestion_snapshot(&self) -> (Vec<BookSummary>, bool, Option<usize>) {
        let pane = lock(&self.pane);
        (pane.items.clone(), pane.visible, pane.selected)
    }
}
