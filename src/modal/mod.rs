//! Paginated list modal with search and a loading placeholder.
//!
//! The modal shows one page of caller-defined items at a time. It owns only
//! the state needed to drive that: the current page, the rows on it, the total
//! count, the search term, the loading flag and the dialog's visibility.
//! Fetching is delegated to a [`Loader`] and row drawing to a [`RowDelegate`].
//!
//! ## Lifecycle
//!
//! - `init()` dispatches [`Loader::initial_load`]. Until it resolves the rows
//!   are replaced by a spinner.
//! - Next/previous page and search each set the loading flag, call the loader,
//!   and replace the rows when it resolves.
//! - `esc` hides the dialog; once the exit delay passes the modal is closed,
//!   the `on_close` callback runs and a [`ClosedMsg`] is emitted.
//!
//! ## Concurrency
//!
//! Only the latest request counts. Starting a fetch aborts the previous one,
//! results from superseded fetches are discarded, and search keystrokes are
//! debounced so a burst of typing produces one fetch.
//!
//! ## Failures
//!
//! A loader error is logged and the modal stays in the loading state. Retry or
//! error reporting belongs in the loader.
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_list_modal::modal::{loader_fn, DefaultDelegate, FetchResult, Item, Model, PageChange};
//! use futures::FutureExt;
//!
//! #[derive(Clone)]
//! struct Fruit(String);
//!
//! impl std::fmt::Display for Fruit {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str(&self.0)
//!     }
//! }
//!
//! impl Item for Fruit {
//!     fn key(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! let loader = loader_fn(
//!     || async { Ok(FetchResult::new(vec![Fruit("apple".into())], 1)) }.boxed(),
//!     |_page, _term| async { Ok(PageChange::Items(vec![])) }.boxed(),
//!     |_term| async { Ok(FetchResult::empty()) }.boxed(),
//! );
//!
//! let modal = Model::new(loader, DefaultDelegate::new())
//!     .with_title("Fruit")
//!     .with_page_size(10);
//! assert!(modal.is_loading());
//! assert_eq!(modal.range_label(), "");
//! ```

pub mod delegate;
pub mod keys;
pub mod loader;
pub mod style;

mod dispatch;
mod model;
mod msgs;
mod rendering;
mod types;


pub use delegate::{DefaultDelegate, DefaultRowStyles, Refresh, RowContext, RowDelegate};
pub use keys::ModalKeyMap;
pub use loader::{loader_fn, FnLoader, Loader};
pub use model::{
    format_number, CloseCallback, Model, RangeFormatter, TitleAction, DEFAULT_SEARCH_DEBOUNCE,
};
pub use msgs::{ClosedMsg, ExitedMsg, LoadedMsg, RefreshMsg, SearchDebounceMsg};
pub use style::ModalStyles;
pub use types::{FetchResult, Focus, Item, PageChange, PageState, Visibility, DEFAULT_PAGE_SIZE};

use crate::{key, Component};
use msgs::FetchKind;
use bubbletea_rs::{Cmd, KeyMsg, Msg, WindowSizeMsg};
use tracing::debug;

impl<I: Item> Model<I> {
    /// Starts the initial load and the loading spinner.
    pub fn init(&mut self) -> Option<Cmd> {
        let load = self.initial_load_cmd();
        Some(bubbletea_rs::batch(vec![load, self.spinner.tick()]))
    }

    /// Loads the next page if the next control is shown.
    pub fn next_page(&mut self) -> Option<Cmd> {
        if !self.is_visible() || !self.has_next_page() {
            return None;
        }
        self.state.current_page += 1;
        Some(self.page_cmd())
    }

    /// Loads the previous page if the previous control is shown.
    pub fn prev_page(&mut self) -> Option<Cmd> {
        if !self.is_visible() || !self.has_prev_page() {
            return None;
        }
        self.state.current_page -= 1;
        Some(self.page_cmd())
    }

    /// Replaces the search box value and schedules a search for it.
    pub fn search(&mut self, term: &str) -> Option<Cmd> {
        if !self.is_visible() {
            return None;
        }
        self.search.set_value(term);
        Some(self.schedule_search(term.to_string()))
    }

    /// Reloads the current page with the current search term.
    ///
    /// Skipped while a search is waiting for its debounce; that search reloads
    /// the rows anyway. While an initial load or a search is running, that
    /// fetch is restarted instead so the total it reports is not lost.
    pub fn refresh(&mut self) -> Option<Cmd> {
        if !self.is_visible() || self.pending_search {
            return None;
        }
        match self.in_flight_kind() {
            Some(FetchKind::Initial) => Some(self.initial_load_cmd()),
            Some(FetchKind::Search) => Some(self.search_cmd()),
            _ => Some(self.refresh_cmd()),
        }
    }

    /// Hides the dialog and schedules the end of the exit transition.
    pub fn hide(&mut self) -> Option<Cmd> {
        if !self.is_visible() {
            return None;
        }
        self.visibility = Visibility::Hidden;
        self.state.visible = false;
        self.pending_search = false;
        self.cancel_in_flight();

        let id = self.id;
        Some(model::delayed(self.exit_delay, move || {
            Box::new(ExitedMsg { id }) as Msg
        }))
    }

    fn on_exited(&mut self) -> Option<Cmd> {
        if self.visibility != Visibility::Hidden {
            return None;
        }
        self.visibility = Visibility::Closed;
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
        debug!(modal = self.id, "closed");

        let id = self.id;
        Some(Box::pin(async move { Some(Box::new(ClosedMsg { id }) as Msg) }))
    }

    /// Processes a message and returns follow-up work for the runtime.
    ///
    /// Messages addressed to another modal are ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.is_closed() {
            return None;
        }

        let msg = match msg.downcast::<LoadedMsg<I>>() {
            Ok(loaded) => {
                if loaded.id == self.id && self.is_visible() {
                    self.apply_loaded(*loaded);
                }
                return None;
            }
            Err(msg) => msg,
        };

        if let Some(tick) = msg.downcast_ref::<crate::spinner::TickMsg>() {
            if tick.id != self.spinner.id() {
                return None;
            }
            if !self.state.is_loading {
                self.spinner_stopped = true;
                return None;
            }
            return self.spinner.update(msg);
        }
        if let Some(debounce) = msg.downcast_ref::<SearchDebounceMsg>() {
            if debounce.id != self.id {
                return None;
            }
            return self.on_debounce(debounce);
        }
        if let Some(refresh) = msg.downcast_ref::<RefreshMsg>() {
            if refresh.id != self.id {
                return None;
            }
            return self.refresh();
        }
        if let Some(exited) = msg.downcast_ref::<ExitedMsg>() {
            if exited.id != self.id {
                return None;
            }
            return self.on_exited();
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_size(size.width as usize, size.height as usize);
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }

    fn handle_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        if !self.is_visible() {
            return None;
        }

        if self.focus == Focus::Search {
            if self.keymap.leave_search.matches(msg) {
                self.set_focus(Focus::Rows);
                return None;
            }
            if self.search.update(msg) {
                let term = self.search.value();
                return Some(self.schedule_search(term));
            }
            return None;
        }

        if self.keymap.close.matches(msg) {
            return self.hide();
        }
        if self.keymap.cursor_up.matches(msg) {
            self.cursor = self.cursor.saturating_sub(1);
            self.sync_viewport();
            return None;
        }
        if self.keymap.cursor_down.matches(msg) {
            if self.cursor + 1 < self.state.items.len() {
                self.cursor += 1;
                self.sync_viewport();
            }
            return None;
        }
        if self.keymap.next_page.matches(msg) {
            return self.next_page();
        }
        if self.keymap.prev_page.matches(msg) {
            return self.prev_page();
        }
        if self.keymap.focus_search.matches(msg) {
            self.set_focus(Focus::Search);
            return None;
        }
        if self.keymap.title_action.matches(msg) {
            return self.title_button.as_ref().and_then(|button| (button.action)());
        }

        if self.state.is_loading {
            return None;
        }
        let item = self.state.items.get(self.cursor)?;
        self.delegate.update(msg, item, Refresh::new(self.id))
    }
}

impl<I: Item> key::KeyMap for Model<I> {
    fn short_help(&self) -> Vec<&key::Binding> {
        match self.focus {
            Focus::Search => vec![&self.keymap.leave_search],
            Focus::Rows => {
                let mut bindings = vec![&self.keymap.cursor_up, &self.keymap.cursor_down];
                if self.has_next_page() {
                    bindings.push(&self.keymap.next_page);
                }
                if self.has_prev_page() {
                    bindings.push(&self.keymap.prev_page);
                }
                bindings.extend([
                    &self.keymap.focus_search,
                    &self.keymap.title_action,
                    &self.keymap.close,
                ]);
                bindings
            }
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        key::KeyMap::full_help(&self.keymap)
    }
}

impl<I: Item> Component for Model<I> {
    /// Focuses the search box.
    fn focus(&mut self) -> Option<Cmd> {
        self.set_focus(Focus::Search);
        None
    }

    /// Returns focus to the rows.
    fn blur(&mut self) {
        self.set_focus(Focus::Rows);
    }

    fn focused(&self) -> bool {
        self.focus == Focus::Search
    }
}
