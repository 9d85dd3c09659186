//! The `Model` struct: construction, configuration and state accessors.

use super::delegate::RowDelegate;
use super::keys::ModalKeyMap;
use super::loader::Loader;
use super::msgs::FetchKind;
use super::style::ModalStyles;
use super::types::{Focus, Item, PageState, Visibility, DEFAULT_PAGE_SIZE};
use crate::{help, searchinput, spinner, Component};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use futures::future::AbortHandle;
use lipgloss_extras::lipgloss;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay between the last keystroke in the search box and the search fetch.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Emits `make()` after `delay`, or right away when the delay is zero.
pub(super) fn delayed<F>(delay: Duration, make: F) -> Cmd
where
    F: Fn() -> Msg + Send + 'static,
{
    if delay.is_zero() {
        return Box::pin(async move { Some(make()) });
    }
    bubbletea_tick(delay, move |_| make())
}

/// Formats the range label from `(start, end, total)`.
pub type RangeFormatter = Box<dyn Fn(usize, usize, usize) -> String + Send + Sync>;

/// Action run by the title button. May return a command for the runtime.
pub type TitleAction = Box<dyn Fn() -> Option<Cmd> + Send + Sync>;

/// Callback run once after the modal closed.
pub type CloseCallback = Box<dyn FnOnce() + Send>;

/// The fetch currently running and how to abort it.
pub(super) struct InFlight {
    pub(super) handle: AbortHandle,
    pub(super) kind: FetchKind,
}

pub(super) struct TitleButton {
    pub(super) text: String,
    pub(super) action: TitleAction,
}

/// A paginated, searchable list dialog.
///
/// The modal owns pagination, search, selection, loading and visibility
/// state. Rows come from a [`Loader`] and are drawn by a [`RowDelegate`].
pub struct Model<I: Item> {
    pub(super) id: i64,

    // Configuration
    pub(super) title: String,
    pub(super) page_size: usize,
    pub(super) loader: Arc<dyn Loader<I>>,
    pub(super) delegate: Box<dyn RowDelegate<I>>,
    pub(super) title_button: Option<TitleButton>,
    pub(super) range_formatter: Option<RangeFormatter>,
    pub(super) on_close: Option<CloseCallback>,
    pub(super) search_debounce: Duration,
    pub(super) exit_delay: Duration,

    // State
    pub(super) state: PageState<I>,
    pub(super) visibility: Visibility,
    pub(super) focus: Focus,
    pub(super) cursor: usize,
    pub(super) viewport_start: usize,

    // Fetch bookkeeping
    pub(super) generation: u64,
    pub(super) in_flight: Option<InFlight>,
    pub(super) debounce_tag: u64,
    pub(super) pending_search: bool,
    /// Set when a spinner tick arrived while idle and the loop ended.
    pub(super) spinner_stopped: bool,

    // UI
    pub(super) search: searchinput::Model,
    pub(super) spinner: spinner::Model,
    pub(super) help: help::Model,
    pub(super) keymap: ModalKeyMap,
    pub(super) styles: ModalStyles,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl<I: Item> Model<I> {
    /// Creates a modal from its loader and row delegate.
    ///
    /// Nothing is fetched until [`Model::init`] runs.
    pub fn new<L, D>(loader: L, delegate: D) -> Self
    where
        L: Loader<I> + 'static,
        D: RowDelegate<I> + 'static,
    {
        let mut keymap = ModalKeyMap::default();
        keymap.title_action.set_enabled(false);
        let styles = ModalStyles::default();

        Self {
            id: next_id(),
            title: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            loader: Arc::new(loader),
            delegate: Box::new(delegate),
            title_button: None,
            range_formatter: None,
            on_close: None,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            exit_delay: Duration::ZERO,
            state: PageState::default(),
            visibility: Visibility::Visible,
            focus: Focus::Rows,
            cursor: 0,
            viewport_start: 0,
            generation: 0,
            in_flight: None,
            debounce_tag: 0,
            pending_search: false,
            spinner_stopped: false,
            search: searchinput::Model::new(),
            spinner: spinner::Model::new().with_style(styles.spinner.clone()),
            help: help::Model::new(),
            keymap,
            styles,
            width: 0,
            height: 0,
        }
    }

    /// Sets the dialog title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the search box placeholder.
    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search.placeholder = placeholder.into();
        self
    }

    /// Sets the page size. Zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Adds a header button. Text and action are required together.
    pub fn with_title_button<F>(mut self, text: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> Option<Cmd> + Send + Sync + 'static,
    {
        let text = text.into();
        let help_key = self.keymap.title_action.help().key.clone();
        let help_key = if help_key.is_empty() {
            "a".to_string()
        } else {
            help_key
        };
        self.keymap.title_action = self
            .keymap
            .title_action
            .clone()
            .with_help(help_key, text.to_lowercase());
        self.keymap.title_action.set_enabled(true);
        self.title_button = Some(TitleButton {
            text,
            action: Box::new(action),
        });
        self
    }

    /// Replaces the `start - end of total total` range label.
    pub fn with_range_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(usize, usize, usize) -> String + Send + Sync + 'static,
    {
        self.range_formatter = Some(Box::new(formatter));
        self
    }

    /// Runs `on_close` once, after the exit transition.
    pub fn with_on_close<F>(mut self, on_close: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_close = Some(Box::new(on_close));
        self
    }

    /// Sets the search debounce. Zero dispatches on the next tick.
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// Sets how long the dialog stays hidden before it counts as closed.
    pub fn with_exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }

    /// Sets the outer size, including the frame.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.set_size(width, height);
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: ModalStyles) -> Self {
        self.spinner.style = styles.spinner.clone();
        self.styles = styles;
        self
    }

    /// Replaces the key bindings.
    pub fn with_keymap(mut self, mut keymap: ModalKeyMap) -> Self {
        keymap
            .title_action
            .set_enabled(self.title_button.is_some());
        self.keymap = keymap;
        self
    }

    /// Chooses whether the search box or the rows start focused.
    pub fn with_initial_focus(mut self, focus: Focus) -> Self {
        self.set_focus(focus);
        self
    }

    /// Updates the outer size, including the frame.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let inner = self.inner_width();
        self.help.width = inner;
        self.search.width = inner.saturating_sub(lipgloss::width_visible(&self.search.prompt) + 1);
        self.sync_viewport();
    }

    /// Unique id carried by this modal's messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current pagination, search and loading state.
    pub fn state(&self) -> &PageState<I> {
        &self.state
    }

    /// Rows of the current page.
    pub fn items(&self) -> &[I] {
        &self.state.items
    }

    /// Zero-based page number.
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Total matching rows as last reported by a loader.
    pub fn total_count(&self) -> usize {
        self.state.total_count
    }

    /// Term the current rows were searched with.
    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    /// True while a fetch is pending.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Dialog lifecycle.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// True until a hide is requested.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// True once the exit finished and the close callback ran.
    pub fn is_closed(&self) -> bool {
        self.visibility == Visibility::Closed
    }

    /// Which area receives keys.
    pub fn focus_area(&self) -> Focus {
        self.focus
    }

    /// Index of the selected row on the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The selected row, if any.
    pub fn selected_item(&self) -> Option<&I> {
        self.state.items.get(self.cursor)
    }

    /// Dialog title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Key bindings.
    pub fn keymap(&self) -> &ModalKeyMap {
        &self.keymap
    }

    /// True when the previous-page control is shown.
    pub fn has_prev_page(&self) -> bool {
        !self.state.is_loading && self.state.current_page > 0
    }

    /// True when the next-page control is shown: the page is full and does not
    /// end exactly at the total.
    pub fn has_next_page(&self) -> bool {
        let shown = self.state.items.len();
        let end = self.state.current_page * self.page_size + shown;
        !self.state.is_loading && shown >= self.page_size && end != self.state.total_count
    }

    /// The range line, e.g. `1 - 50 of 1,234 total`. Empty when the page has
    /// no rows.
    pub fn range_label(&self) -> String {
        let shown = self.state.items.len();
        if shown == 0 {
            return String::new();
        }
        let start = self.state.current_page * self.page_size + 1;
        let end = start + shown - 1;
        let total = self.state.total_count;
        match &self.range_formatter {
            Some(format) => format(start, end, total),
            None => format!(
                "{} - {} of {} total",
                format_number(start),
                format_number(end),
                format_number(total)
            ),
        }
    }

    pub(super) fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Search => {
                let _ = self.search.focus();
            }
            Focus::Rows => self.search.blur(),
        }
    }

    pub(super) fn inner_width(&self) -> usize {
        // Border plus one column of padding on each side.
        self.width.saturating_sub(4)
    }

    /// Rows that fit between the header and footer; `None` when unbounded.
    pub(super) fn rows_per_view(&self) -> Option<usize> {
        if self.height == 0 {
            return None;
        }
        // Border (2), title, search, range, controls, blank line and help.
        let chrome = 8;
        let row_height = self.delegate.height().max(1);
        Some((self.height.saturating_sub(chrome) / row_height).max(1))
    }

    pub(super) fn sync_viewport(&mut self) {
        let Some(visible) = self.rows_per_view() else {
            self.viewport_start = 0;
            return;
        };
        if self.cursor < self.viewport_start {
            self.viewport_start = self.cursor;
        } else if self.cursor >= self.viewport_start + visible {
            self.viewport_start = self.cursor + 1 - visible;
        }
    }
}

/// Formats an integer with comma thousands separators.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
