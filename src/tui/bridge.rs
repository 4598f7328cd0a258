//! Adapters that let the autocomplete controller drive the terminal UI.
//! Every mutation pings the event loop so it redraws.

use tokio::sync::mpsc::UnboundedSender;

use super::state::{Shared, SuggestionPane, UiEvent, lock};
use crate::autocomplete::{ResultsView, SearchField};
use crate::books::BookSummary;
use crate::nav::{Navigator, Route};

pub struct TuiSearchField {
    pub text: Shared<String>,
    pub tx: UnboundedSender<UiEvent>,
}

impl SearchField for TuiSearchField {
    fn value(&self) -> String {
        lock(&self.text).clone()
    }

    fn set_value(&self, value: &str) {
        *lock(&self.text) = value.to_string();
        self.tx.send(UiEvent::Redraw).ok();
    }
}

pub struct TuiResults {
    pub pane: Shared<SuggestionPane>,
    pub tx: UnboundedSender<UiEvent>,
}

impl ResultsView for TuiResults {
    fn replace(&self, items: &[BookSummary]) {
        let mut pane = lock(&self.pane);
        pane.items = items.to_vec();
        pane.selected = None;
        self.tx.send(UiEvent::Redraw).ok();
    }

    fn clear(&self) {
        let mut pane = lock(&self.pane);
        pane.items.clear();
        pane.selected = None;
        self.tx.send(UiEvent::Redraw).ok();
    }

    fn set_visible(&self, visible: bool) {
        lock(&self.pane).visible = visible;
        self.tx.send(UiEvent::Redraw).ok();
    }

    fn len(&self) -> usize {
        lock(&self.pane).items.len()
    }
}

pub struct TuiNavigator {
    pub tx: UnboundedSender<UiEvent>,
}

impl Navigator for TuiNavigator {
    fn navigate(&self, route: Route) {
        self.tx.send(UiEvent::Navigate(route)).ok();
    }

    fn notify(&self, notice: &str) {
        self.tx.send(UiEvent::Notice(notice.to_string())).ok();
    }
}
