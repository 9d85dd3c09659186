//! Messages exchanged between the modal and the bubbletea runtime.
//!
//! Every message carries the id of the modal it belongs to. Load results also
//! carry the generation they were dispatched with so a superseded fetch can
//! never overwrite newer state.

use super::types::{FetchResult, PageChange};
use crate::error::LoadError;

/// A loader resolved.
pub struct LoadedMsg<I> {
    /// Modal that dispatched the fetch.
    pub id: i64,
    /// Dispatch generation; results from older generations are dropped.
    pub generation: u64,
    pub(crate) outcome: Outcome<I>,
}

pub(crate) enum Outcome<I> {
    Initial(Result<FetchResult<I>, LoadError>),
    Page(Result<PageChange<I>, LoadError>),
    Search(Result<FetchResult<I>, LoadError>),
    Refresh(Result<PageChange<I>, LoadError>),
}

/// Which loader call a fetch is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchKind {
    Initial,
    Page,
    Search,
    Refresh,
}

impl<I> Outcome<I> {
    pub(crate) fn kind(&self) -> FetchKind {
        match self {
            Outcome::Initial(_) => FetchKind::Initial,
            Outcome::Page(_) => FetchKind::Page,
            Outcome::Search(_) => FetchKind::Search,
            Outcome::Refresh(_) => FetchKind::Refresh,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self.kind() {
            FetchKind::Initial => "initial load",
            FetchKind::Page => "page change",
            FetchKind::Search => "search",
            FetchKind::Refresh => "refresh",
        }
    }
}

/// The search debounce elapsed. Only the tick for the latest keystroke
/// dispatches a search.
#[derive(Debug, Clone)]
pub struct SearchDebounceMsg {
    /// Target modal.
    pub id: i64,
    pub(crate) tag: u64,
}

/// Reload the current page. Sent through a row's [`Refresh`](super::Refresh)
/// handle.
#[derive(Debug, Clone)]
pub struct RefreshMsg {
    /// Target modal.
    pub id: i64,
}

/// The exit transition finished.
#[derive(Debug, Clone)]
pub struct ExitedMsg {
    /// Target modal.
    pub id: i64,
}

/// Emitted once after the modal closed and its close callback ran. Parents
/// use it to drop the modal or quit.
#[derive(Debug, Clone)]
pub struct ClosedMsg {
    /// The modal that closed.
    pub id: i64,
}
