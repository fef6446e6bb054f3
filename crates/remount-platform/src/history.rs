//! Location fragment and session history entries.

use std::cell::RefCell;

pub struct History {
    entries: RefCell<Vec<String>>,
}

impl History {
    /// `hash` is the initial fragment, including the `#`, or empty.
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            entries: RefCell::new(vec![hash.into()]),
        }
    }

    /// Fragment of the current entry.
    pub fn hash(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_default()
    }

    /// Adds an entry without navigating. An empty `url` keeps the current
    /// fragment.
    pub fn push_state(&self, url: &str) {
        let next = if url.is_empty() {
            self.hash()
        } else {
            url.to_string()
        };
        log::debug!("history: push {next:?}");
        self.entries.borrow_mut().push(next);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}
