#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-list-modal/")]

//! # bubbletea-list-modal
//!
//! A paginated, searchable list dialog for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, plus a team-groups dialog built on top of it.
//!
//! ## Overview
//!
//! The [`modal`] component shows one page of items at a time with a search
//! box, a `1 - 50 of 1,234 total` range line, previous/next controls and a
//! loading placeholder. It never fetches or draws items itself: a
//! [`modal::Loader`] supplies pages and a [`modal::RowDelegate`] renders rows
//! and handles row actions. Like every bubbletea component it follows the Elm
//! Architecture with `init()`, `update()` and `view()`.
//!
//! [`group`] wires the modal to a [`group::GroupService`] to list the groups
//! linked to a team, with a remove action on each row.
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | `ListModal` | Paginated list dialog with search |
//! | `GroupListModal` | Team groups dialog |
//! | `SearchInput` | Single-line search box |
//! | `Spinner` | Loading animation |
//! | `HelpModel` | One-line key binding help |
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust,no_run
//! use bubbletea_list_modal::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use futures::FutureExt;
//!
//! #[derive(Clone)]
//! struct Name(String);
//!
//! impl std::fmt::Display for Name {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str(&self.0)
//!     }
//! }
//!
//! impl Item for Name {
//!     fn key(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! struct App {
//!     modal: ListModal<Name>,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let loader = loader_fn(
//!             || async { Ok(FetchResult::new(vec![Name("ada".into())], 1)) }.boxed(),
//!             |_page, _term| async { Ok(PageChange::Items(Vec::new())) }.boxed(),
//!             |_term| async { Ok(FetchResult::empty()) }.boxed(),
//!         );
//!         let mut modal = ListModal::new(loader, DefaultDelegate::new()).with_title("People");
//!         let cmd = modal.init();
//!         (Self { modal }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if msg.downcast_ref::<ClosedMsg>().is_some() {
//!             return Some(bubbletea_rs::quit());
//!         }
//!         self.modal.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.modal.view()
//!     }
//! }
//! ```

pub mod error;
pub mod group;
pub mod help;
pub mod key;
pub mod modal;
pub mod searchinput;
pub mod spinner;

use bubbletea_rs::Cmd;

/// Core trait for components that take keyboard focus.
///
/// - `focus()` sets the focused state and may return a command
/// - `blur()` clears it
/// - `focused()` reports it
///
/// ```rust
/// use bubbletea_list_modal::prelude::*;
///
/// let mut input = SearchInput::new();
/// assert!(!input.focused());
///
/// input.focus();
/// assert!(input.focused());
///
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use error::LoadError;
pub use group::{
    Group, GroupListModal, GroupLoader, GroupPage, GroupRowDelegate, GroupService,
    GroupServiceError, ModalIdentifier, SyncableType, Team,
};
pub use help::Model as HelpModel;
pub use key::{
    matches, new_binding, with_disabled, with_help, with_keys_str, Binding, Help as KeyHelp,
    KeyMap, KeyPress,
};
pub use modal::Model as ListModal;
pub use searchinput::Model as SearchInput;
pub use spinner::{Model as Spinner, TickMsg as SpinnerTickMsg, ELLIPSIS, LINE, MINI_DOT};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_list_modal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::LoadError;
    pub use crate::group::{GroupListModal, GroupService, Team};
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
    pub use crate::modal::{
        loader_fn, ClosedMsg, DefaultDelegate, FetchResult, Focus, Item, Loader, Model as ListModal,
        PageChange, Refresh, RowContext, RowDelegate, Visibility,
    };
    pub use crate::searchinput::Model as SearchInput;
    pub use crate::spinner::Model as Spinner;
    pub use crate::Component;
}
