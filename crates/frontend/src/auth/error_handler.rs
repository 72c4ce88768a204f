//! Global auth error handler
//!
//! Lets the interceptor reach the auth context without components checking
//! every response for 401 themselves.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    /// Global auth error callback
    static AUTH_ERROR_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Set the global auth error callback
pub fn set_auth_error_callback(callback: Rc<dyn Fn()>) {
    AUTH_ERROR_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

/// Clear the auth error callback
pub fn clear_auth_error_callback() {
    AUTH_ERROR_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Run the callback; false when none is registered
pub fn trigger_auth_error() -> bool {
    // Clone out so the callback may replace itself
    let callback = AUTH_ERROR_CALLBACK.with(|cb| cb.borrow().clone());
    match callback {
        Some(callback) => {
            callback();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_trigger_reaches_registered_callback() {
        assert!(!trigger_auth_error());

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        set_auth_error_callback(Rc::new(move || counter.set(counter.get() + 1)));
        assert!(trigger_auth_error());
        assert_eq!(calls.get(), 1);

        clear_auth_error_callback();
        assert!(!trigger_auth_error());
        assert_eq!(calls.get(), 1);
    }
}
