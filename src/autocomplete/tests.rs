use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;
use crate::books::BookSummary;
use crate::books::testing::{FakeBooks, volume};
use crate::config::AutocompleteConfig;
use crate::nav::{Navigator, Route};

#[derive(Default)]
struct FakeField(Mutex<String>);

impl FakeField {
    fn type_text(&self, text: &str) {
        *self.0.lock().unwrap() = text.to_string();
    }
}

impl SearchField for FakeField {
    fn value(&self) -> String {
        self.0.lock().unwrap().clone()
    }
    fn set_value(&self, value: &str) {
        *self.0.lock().unwrap() = value.to_string();
    }
}

#[derive(Default)]
struct FakeView {
    items: Mutex<Vec<BookSummary>>,
    visible: Mutex<bool>,
}

impl FakeView {
    fn visible(&self) -> bool {
        *self.visible.lock().unwrap()
    }
    fn titles(&self) -> Vec<String> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.display_title().to_string())
            .collect()
    }
}

impl ResultsView for FakeView {
    fn replace(&self, items: &[BookSummary]) {
        *self.items.lock().unwrap() = items.to_vec();
    }
    fn clear(&self) {
        self.items.lock().unwrap().clear();
    }
    fn set_visible(&self, visible: bool) {
        *self.visible.lock().unwrap() = visible;
    }
    fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[derive(Default)]
struct FakeNavigator {
    routes: Mutex<Vec<Route>>,
    notices: Mutex<Vec<String>>,
}

impl Navigator for FakeNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
    fn notify(&self, notice: &str) {
        self.notices.lock().unwrap().push(notice.to_string());
    }
}

struct Harness {
    field: Arc<FakeField>,
    view: Arc<FakeView>,
    nav: Arc<FakeNavigator>,
    books: Arc<FakeBooks>,
    ctl: AutocompleteController,
}

fn harness(books: FakeBooks) -> Harness {
    let field = Arc::new(FakeField::default());
    let view = Arc::new(FakeView::default());
    let nav = Arc::new(FakeNavigator::default());
    let books = Arc::new(books);
    let ctl = AutocompleteController::new(
        field.clone(),
        view.clone(),
        nav.clone(),
        books.clone(),
        AutocompleteConfig::default(),
    );
    Harness {
        field,
        view,
        nav,
        books,
        ctl,
    }
}

impl Harness {
    fn type_text(&self, text: &str) {
        self.field.type_text(text);
        self.ctl.on_input();
    }
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn two_harry_books() -> FakeBooks {
    FakeBooks::default().with(
        "harry",
        vec![
            volume("hp1", "Harry Potter and the Philosopher's Stone"),
            volume("hp2", "Harry Potter and the Chamber of Secrets"),
        ],
    )
}

#[tokio::test(start_paused = true)]
async fn long_query_fetches_after_debounce() {
    let h = harness(two_harry_books());
    h.type_text("harry");

    advance(250).await;
    assert!(h.books.queries().is_empty());
    assert!(h.ctl.has_pending_fetch());

    advance(100).await;
    let reqs = h.books.requests.lock().unwrap().clone();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].query, "harry");
    assert_eq!(reqs[0].max_results, 5);
    assert_eq!(h.view.len(), 2);
    assert!(h.view.visible());
    assert!(!h.ctl.has_pending_fetch());
}

#[tokio::test(start_paused = true)]
async fn short_query_clears_and_hides_synchronously() {
    let h = harness(two_harry_books());
    h.type_text("harry");
    advance(350).await;
    assert!(h.view.visible());

    h.type_text("ha");
    // no time passes: hiding is synchronous
    assert!(!h.view.visible());
    assert_eq!(h.view.len(), 0);
    assert!(h.ctl.suggestions().is_empty());
    assert!(!h.ctl.has_pending_fetch());

    advance(1_000).await;
    assert_eq!(h.books.queries(), vec!["harry".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn whitespace_is_trimmed_before_length_check() {
    let h = harness(FakeBooks::default());
    h.type_text("  ab   ");
    advance(1_000).await;
    assert!(h.books.queries().is_empty());
    assert!(!h.view.visible());
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_keeps_only_last_fetch() {
    let h = harness(two_harry_books());
    for text in ["har", "harr", "harry"] {
        h.type_text(text);
        assert!(h.ctl.has_pending_fetch());
        advance(100).await;
    }
    advance(400).await;
    assert_eq!(h.books.queries(), vec!["harry".to_string()]);
    assert_eq!(h.view.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn stale_response_is_dropped() {
    let books = FakeBooks::default()
        .with("dune", vec![volume("d1", "Dune")])
        .with("dune messiah", vec![volume("d2", "Dune Messiah")])
        .delayed("dune", Duration::from_millis(500));
    let h = harness(books);

    h.type_text("dune");
    advance(350).await; // "dune" is now in flight until t=800
    h.type_text("dune messiah");
    advance(350).await;
    assert_eq!(h.view.titles(), vec!["Dune Messiah".to_string()]);

    advance(500).await; // the old response has landed by now
    assert_eq!(h.view.titles(), vec!["Dune Messiah".to_string()]);
    assert_eq!(h.books.queries().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn in_flight_response_does_not_reopen_after_short_query() {
    let books = FakeBooks::default()
        .with("dune", vec![volume("d1", "Dune")])
        .delayed("dune", Duration::from_millis(500));
    let h = harness(books);

    h.type_text("dune");
    advance(350).await;
    h.type_text("du");
    advance(1_000).await;
    assert!(!h.view.visible());
    assert_eq!(h.view.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn empty_and_failed_results_hide_the_view() {
    let h = harness(FakeBooks::default());
    h.type_text("zzzzqx");
    advance(350).await;
    assert_eq!(h.books.queries().len(), 1);
    assert!(!h.view.visible());
    assert_eq!(h.view.len(), 0);

    let h = harness(two_harry_books().failing());
    h.type_text("harry");
    advance(350).await;
    assert!(!h.view.visible());
    assert!(h.ctl.suggestions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn at_most_max_suggestions_render() {
    let many = (0..8)
        .map(|i| volume(&format!("id{i}"), &format!("Book {i}")))
        .collect();
    let h = harness(FakeBooks::default().with("book", many));
    h.type_text("book");
    advance(350).await;
    assert_eq!(h.view.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn selecting_fills_field_and_navigates() {
    let h = harness(two_harry_books());
    h.type_text("harry");
    advance(350).await;

    let picked = h.ctl.select(1).unwrap();
    assert_eq!(picked.id, "hp2");
    assert_eq!(h.field.value(), "Harry Potter and the Chamber of Secrets");
    assert!(!h.view.visible());
    let routes = h.nav.routes.lock().unwrap().clone();
    assert_eq!(routes, vec![Route::BookDetail { id: "hp2".into() }]);
    assert!(routes[0].to_string().contains("hp2"));

    assert!(h.ctl.select(7).is_none());
}

#[tokio::test(start_paused = true)]
async fn blur_hides_after_grace_and_focus_reshows() {
    let h = harness(two_harry_books());
    h.type_text("harry");
    advance(350).await;

    h.ctl.on_blur();
    advance(50).await;
    assert!(h.view.visible(), "still visible inside the grace window");
    advance(100).await;
    assert!(!h.view.visible());

    h.ctl.on_focus();
    assert!(h.view.visible());
}

#[tokio::test(start_paused = true)]
async fn focus_inside_grace_cancels_hide() {
    let h = harness(two_harry_books());
    h.type_text("harry");
    advance(350).await;

    h.ctl.on_blur();
    advance(50).await;
    h.ctl.on_focus();
    advance(500).await;
    assert!(h.view.visible());
}

#[tokio::test(start_paused = true)]
async fn late_response_after_blur_renders_hidden() {
    let h = harness(two_harry_books().delayed("harry", Duration::from_millis(500)));
    h.type_text("harry");
    advance(350).await;
    assert_eq!(h.books.queries(), vec!["harry".to_string()]);

    h.ctl.on_blur();
    advance(150).await;
    assert!(!h.view.visible());

    advance(500).await;
    assert_eq!(h.view.len(), 2);
    assert!(!h.view.visible(), "unfocused field must not reopen the list");

    h.ctl.on_focus();
    assert!(h.view.visible());
}

#[tokio::test(start_paused = true)]
async fn focus_does_not_show_for_short_query() {
    let h = harness(two_harry_books());
    h.type_text("harry");
    advance(350).await;
    h.ctl.on_blur();
    advance(200).await;

    // edited without an input event reaching the controller
    h.field.type_text("ha");
    h.ctl.on_focus();
    assert!(!h.view.visible());
}

#[tokio::test(start_paused = true)]
async fn submit_routes_to_results_or_warns() {
    let h = harness(two_harry_books());
    h.field.type_text("   ");
    h.ctl.submit();
    assert_eq!(
        h.nav.notices.lock().unwrap().clone(),
        vec![EMPTY_SEARCH_NOTICE.to_string()]
    );

    h.type_text(" harry ");
    h.ctl.submit();
    assert!(!h.ctl.has_pending_fetch());
    advance(1_000).await;
    assert!(h.books.queries().is_empty());
    assert_eq!(
        h.nav.routes.lock().unwrap().clone(),
        vec![Route::SearchResults {
            query: "harry".into()
        }]
    );
}
