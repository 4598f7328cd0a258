//! Debounced search-as-you-type.
//!
//! The controller never touches a concrete UI. It reads and writes the
//! query through [`SearchField`], projects suggestions into a
//! [`ResultsView`], and leaves screen changes to a
//! [`Navigator`](crate::nav::Navigator).

mod controller;

pub use controller::*;

use crate::books::BookSummary;

pub trait SearchField: Send + Sync {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// The suggestion container.
pub trait ResultsView: Send + Sync {
    /// Replace the displayed items with `items`, in order.
    fn replace(&self, items: &[BookSummary]);
    fn clear(&self);
    fn set_visible(&self, visible: bool);
    /// Number of items currently held, visible or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
