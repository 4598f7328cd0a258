use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{ResultsView, SearchField};
use crate::books::{BookSearch, BookSummary, SearchRequest, search_summaries};
use crate::config::AutocompleteConfig;
use crate::nav::{Navigator, Route};

pub const EMPTY_SEARCH_NOTICE: &str = "Please enter a book to search for.";

/// Owns the debounce timer, the blur timer and the stale-response guard for
/// one search field. Cloning shares the same controller.
#[derive(Clone)]
pub struct AutocompleteController {
    inner: Arc<Inner>,
}

struct Inner {
    field: Arc<dyn SearchField>,
    view: Arc<dyn ResultsView>,
    navigator: Arc<dyn Navigator>,
    books: Arc<dyn BookSearch>,
    cfg: AutocompleteConfig,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    /// Bumped on every input change; a response renders only while its
    /// generation is still current.
    generation: u64,
    /// The scheduled (not yet fired) fetch, if any.
    pending: Option<JoinHandle<()>>,
    blur: Option<JoinHandle<()>>,
    /// The field has lost focus; late responses render without showing.
    blurred: bool,
    rendered: Vec<BookSummary>,
}

impl AutocompleteController {
    pub fn new(
        field: Arc<dyn SearchField>,
        view: Arc<dyn ResultsView>,
        navigator: Arc<dyn Navigator>,
        books: Arc<dyn BookSearch>,
        cfg: AutocompleteConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                field,
                view,
                navigator,
                books,
                cfg,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Input-change event. Cancels the scheduled fetch, then either clears
    /// the view (short query) or schedules a new fetch after the debounce
    /// delay. Must be called from within a tokio runtime.
    pub fn on_input(&self) {
        let query = self.inner.field.value().trim().to_string();
        let mut st = self.inner.lock();
        if let Some(prev) = st.pending.take() {
            prev.abort();
        }
        st.generation += 1;
        let generation = st.generation;

        if !self.inner.qualifies(&query) {
            self.inner.clear_results(&mut st);
            return;
        }

        debug!(%query, generation, "scheduling suggestion fetch");
        let inner = Arc::clone(&self.inner);
        st.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.cfg.debounce()).await;
            {
                let mut st = inner.lock();
                if st.generation != generation {
                    return;
                }
                // fired: from here on the request is never cancelled
                st.pending = None;
            }
            inner.fetch(generation, query).await;
        }));
    }

    /// The field lost focus: hide results after the grace delay so a
    /// selection in progress still lands.
    pub fn on_blur(&self) {
        let mut st = self.inner.lock();
        if let Some(prev) = st.blur.take() {
            prev.abort();
        }
        st.blurred = true;
        let inner = Arc::clone(&self.inner);
        st.blur = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.cfg.blur_grace()).await;
            let mut st = inner.lock();
            st.blur = None;
            inner.view.set_visible(false);
        }));
    }

    /// The field regained focus: re-show what was rendered before, if the
    /// current query still qualifies.
    pub fn on_focus(&self) {
        let mut st = self.inner.lock();
        if let Some(blur) = st.blur.take() {
            blur.abort();
        }
        st.blurred = false;
        let query = self.inner.field.value();
        if self.inner.qualifies(query.trim()) && !self.inner.view.is_empty() {
            self.inner.view.set_visible(true);
        }
    }

    /// Pick the suggestion at `index`: fill the field with its title, hide
    /// the list and open its detail view.
    pub fn select(&self, index: usize) -> Option<BookSummary> {
        let item = {
            let mut st = self.inner.lock();
            let item = st.rendered.get(index).cloned()?;
            // anything still in flight belongs to the query being replaced
            if let Some(prev) = st.pending.take() {
                prev.abort();
            }
            st.generation += 1;
            item
        };
        info!(id = %item.id, title = %item.display_title(), "suggestion selected");
        self.inner.field.set_value(item.display_title());
        self.inner.view.set_visible(false);
        self.inner.navigator.navigate(Route::BookDetail {
            id: item.id.clone(),
        });
        Some(item)
    }

    /// Full search (Enter or the search button).
    pub fn submit(&self) {
        let query = self.inner.field.value().trim().to_string();
        if query.is_empty() {
            self.inner.navigator.notify(EMPTY_SEARCH_NOTICE);
            return;
        }
        {
            let mut st = self.inner.lock();
            if let Some(prev) = st.pending.take() {
                prev.abort();
            }
            st.generation += 1;
            self.inner.view.set_visible(false);
        }
        info!(%query, "full search submitted");
        self.inner
            .navigator
            .navigate(Route::SearchResults { query });
    }

    #[cfg(test)]
    pub fn suggestions(&self) -> Vec<BookSummary> {
        self.inner.lock().rendered.clone()
    }

    /// True while a fetch is scheduled but has not fired yet.
    #[cfg(test)]
    pub fn has_pending_fetch(&self) -> bool {
        self.inner
            .lock()
            .pending
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        // a panic while holding the lock leaves plain data behind; keep going
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn qualifies(&self, query: &str) -> bool {
        query.chars().count() > self.cfg.min_query_chars
    }

    fn clear_results(&self, st: &mut State) {
        st.rendered.clear();
        self.view.clear();
        self.view.set_visible(false);
    }

    async fn fetch(&self, generation: u64, query: String) {
        let req = SearchRequest::new(query.clone(), self.cfg.max_suggestions);
        let mut items = search_summaries(self.books.as_ref(), &req).await;
        items.truncate(self.cfg.max_suggestions);

        let mut st = self.lock();
        if st.generation != generation {
            debug!(%query, generation, latest = st.generation, "dropping stale suggestions");
            return;
        }
        debug!(%query, count = items.len(), "rendering suggestions");
        if items.is_empty() {
            self.clear_results(&mut st);
            return;
        }
        self.view.replace(&items);
        if !st.blurred {
            self.view.set_visible(true);
        }
        st.rendered = items;
    }
}
