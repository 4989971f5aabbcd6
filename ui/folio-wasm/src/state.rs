//! Shared page context.
//!
//! One `Portfolio` instance lives behind `Rc<RefCell<_>>` (WASM is
//! single-threaded) and every handler receives a cloned `Ctx`. Borrows are
//! scoped to a single callback and never held across an `.await`.

use crate::dom::Elements;
use folio_storage::{KeyValueStore, StorageError};
use folio_view::Portfolio;
use folio_view::typewriter::Typewriter;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ── localStorage ──

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `window.localStorage`, tolerant of browsers where it is disabled.
#[derive(Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let s = storage().ok_or(StorageError::Unavailable)?;
        s.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_owned(),
            reason: format!("{:?}", e),
        })
    }
}

pub type App = Portfolio<BrowserStore>;

/// A typewriter frozen by power saving, kept so it can resume in place.
pub type PausedTypewriter = (web_sys::Element, Rc<RefCell<Typewriter>>);

#[derive(Clone)]
pub struct Ctx {
    pub els: Elements,
    pub app: Rc<RefCell<App>>,
    /// Pending typewriter timeout, cleared on page teardown.
    pub typewriter_timer: Rc<Cell<Option<i32>>>,
    pub typewriter_stopped: Rc<Cell<bool>>,
    pub typewriter_paused: Rc<RefCell<Option<PausedTypewriter>>>,
}

impl Ctx {
    pub fn new(els: Elements, app: App) -> Self {
        Self {
            els,
            app: Rc::new(RefCell::new(app)),
            typewriter_timer: Rc::new(Cell::new(None)),
            typewriter_stopped: Rc::new(Cell::new(false)),
            typewriter_paused: Rc::new(RefCell::new(None)),
        }
    }

    /// Run a closure with shared read access to the state.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&App) -> R,
    {
        f(&self.app.borrow())
    }

    /// Run a closure with mutable access to the state.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut App) -> R,
    {
        f(&mut self.app.borrow_mut())
    }
}
