//! Core types for the list modal.
//!
//! - `Item` for caller-defined rows
//! - `FetchResult` and `PageChange`, the values loaders resolve to
//! - `PageState`, the modal's pagination/search/loading state
//! - `Visibility` and `Focus`

/// Rows fetched per navigation step unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A row shown in the modal.
///
/// The modal never looks inside an item. The only thing it asks for is a
/// stable identity, used to keep the selection on the same row when the
/// current page is reloaded.
///
/// ```rust
/// use bubbletea_list_modal::modal::Item;
///
/// #[derive(Clone)]
/// struct User {
///     id: String,
///     name: String,
/// }
///
/// impl Item for User {
///     fn key(&self) -> String {
///         self.id.clone()
///     }
/// }
/// ```
pub trait Item: Clone + Send + Sync + 'static {
    /// Identity of this row.
    fn key(&self) -> String;
}

/// One page of items plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult<I> {
    /// Items on the page, in display order.
    pub items: Vec<I>,
    /// Total items across all pages.
    pub total_count: usize,
}

impl<I> FetchResult<I> {
    /// Creates a result.
    pub fn new(items: Vec<I>, total_count: usize) -> Self {
        Self { items, total_count }
    }

    /// An empty result.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// What a page-change loader resolves to.
///
/// `Full` refreshes the total count as well as the rows; `Items` replaces the
/// rows only and keeps the count from the last initial load or search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageChange<I> {
    /// Rows and a fresh total.
    Full(FetchResult<I>),
    /// Rows only.
    Items(Vec<I>),
}

impl<I> From<FetchResult<I>> for PageChange<I> {
    fn from(result: FetchResult<I>) -> Self {
        PageChange::Full(result)
    }
}

impl<I> From<Vec<I>> for PageChange<I> {
    fn from(items: Vec<I>) -> Self {
        PageChange::Items(items)
    }
}

/// Pagination, search and loading state owned by one modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState<I> {
    /// False once the modal was asked to hide.
    pub visible: bool,
    /// Zero-based page number.
    pub current_page: usize,
    /// Rows of the current page. Never longer than the page size.
    pub items: Vec<I>,
    /// Total matching rows as last reported by a loader.
    pub total_count: usize,
    /// True while a fetch is pending.
    pub is_loading: bool,
    /// Term last typed into the search box.
    pub search_term: String,
}

impl<I> Default for PageState<I> {
    fn default() -> Self {
        Self {
            visible: true,
            current_page: 0,
            items: Vec::new(),
            total_count: 0,
            is_loading: true,
            search_term: String::new(),
        }
    }
}

/// Lifecycle of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Shown and accepting input.
    #[default]
    Visible,
    /// Hide requested; the exit transition is running.
    Hidden,
    /// Exit finished and the close callback ran.
    Closed,
}

/// Which part of the modal receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The row list.
    #[default]
    Rows,
    /// The search box.
    Search,
}
