use std::cell::RefCell;
use taskdesk_core::{Navigator, Redirect};

/// Navigator that remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<Redirect>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Redirect> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: Redirect) {
        self.visited.borrow_mut().push(to);
    }
}
