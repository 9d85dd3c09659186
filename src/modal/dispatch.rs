//! Fetch dispatch, cancellation and result handling.
//!
//! Every fetch bumps `generation` and runs inside an abortable future. Starting
//! a new fetch aborts the previous one, and a result whose generation is not
//! current is dropped, so the last request the user made always wins.
//!
//! Search is debounced with a tagged tick: each keystroke bumps
//! `debounce_tag`, and only the tick carrying the latest tag dispatches.
//!
//! The spinner loop ends on the first tick that arrives while idle. Moving
//! back into the loading state restarts it.

use super::model::{delayed, InFlight, Model};
use super::msgs::{FetchKind, LoadedMsg, Outcome, SearchDebounceMsg};
use super::types::{FetchResult, Item, PageChange};
use bubbletea_rs::{Cmd, Msg};
use futures::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

impl<I: Item> Model<I> {
    fn dispatch<F>(&mut self, kind: FetchKind, fetch: F) -> Cmd
    where
        F: Future<Output = Outcome<I>> + Send + 'static,
    {
        self.cancel_in_flight();
        let restart = self.begin_loading();

        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(InFlight { handle, kind });

        let id = self.id;
        let generation = self.generation;
        let fetch = Abortable::new(fetch, registration);
        let cmd: Cmd = Box::pin(async move {
            match fetch.await {
                Ok(outcome) => Some(Box::new(LoadedMsg {
                    id,
                    generation,
                    outcome,
                }) as Msg),
                Err(_aborted) => None,
            }
        });
        with_spinner(cmd, restart)
    }

    /// Enters the loading state. Returns the first tick of a new spinner loop
    /// when the previous loop already ended.
    fn begin_loading(&mut self) -> Option<Cmd> {
        self.state.is_loading = true;
        if !self.spinner_stopped {
            return None;
        }
        self.spinner_stopped = false;
        Some(self.spinner.restart())
    }

    /// Aborts the pending fetch, if any, and invalidates its result.
    pub(super) fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
            debug!(
                modal = self.id,
                generation = self.generation,
                kind = ?in_flight.kind,
                "superseded fetch aborted"
            );
        }
        self.generation += 1;
    }

    /// Kind of the fetch still running, if any.
    pub(super) fn in_flight_kind(&self) -> Option<FetchKind> {
        self.in_flight.as_ref().map(|in_flight| in_flight.kind)
    }

    pub(crate) fn initial_load_cmd(&mut self) -> Cmd {
        let loader = Arc::clone(&self.loader);
        debug!(modal = self.id, "initial load");
        self.dispatch(FetchKind::Initial, async move {
            Outcome::Initial(loader.initial_load().await)
        })
    }

    pub(super) fn page_cmd(&mut self) -> Cmd {
        let loader = Arc::clone(&self.loader);
        let page = self.state.current_page;
        let term = self.state.search_term.clone();
        debug!(modal = self.id, page, term = %term, "page change");
        self.dispatch(FetchKind::Page, async move {
            Outcome::Page(loader.on_page_change(page, &term).await)
        })
    }

    pub(super) fn refresh_cmd(&mut self) -> Cmd {
        let loader = Arc::clone(&self.loader);
        let page = self.state.current_page;
        let term = self.state.search_term.clone();
        debug!(modal = self.id, page, "refresh");
        self.dispatch(FetchKind::Refresh, async move {
            Outcome::Refresh(loader.on_page_change(page, &term).await)
        })
    }

    pub(super) fn search_cmd(&mut self) -> Cmd {
        let loader = Arc::clone(&self.loader);
        let term = self.state.search_term.clone();
        self.state.current_page = 0;
        debug!(modal = self.id, term = %term, "search");
        self.dispatch(FetchKind::Search, async move {
            Outcome::Search(loader.on_search_input(&term).await)
        })
    }

    /// Records a new search term and schedules its debounced dispatch.
    ///
    /// The modal shows the loading placeholder right away and pagination is
    /// disabled until the search resolves.
    pub(super) fn schedule_search(&mut self, term: String) -> Cmd {
        self.cancel_in_flight();
        let restart = self.begin_loading();
        self.state.search_term = term;
        self.pending_search = true;
        self.debounce_tag += 1;

        let id = self.id;
        let tag = self.debounce_tag;
        let debounce = delayed(self.search_debounce, move || {
            Box::new(SearchDebounceMsg { id, tag }) as Msg
        });
        with_spinner(debounce, restart)
    }

    pub(super) fn on_debounce(&mut self, msg: &SearchDebounceMsg) -> Option<Cmd> {
        if msg.tag != self.debounce_tag || !self.pending_search {
            return None;
        }
        self.pending_search = false;
        Some(self.search_cmd())
    }

    pub(super) fn apply_loaded(&mut self, msg: LoadedMsg<I>) {
        if msg.generation != self.generation {
            debug!(
                modal = self.id,
                generation = msg.generation,
                current = self.generation,
                "stale {} result dropped",
                msg.outcome.label()
            );
            return;
        }
        self.in_flight = None;

        let label = msg.outcome.label();
        let is_refresh = matches!(msg.outcome, Outcome::Refresh(_));
        let selected_key = self.selected_item().map(|item| item.key());
        let result = match msg.outcome {
            Outcome::Initial(r) | Outcome::Search(r) => r.map(PageChange::Full),
            Outcome::Page(r) => r,
            Outcome::Refresh(r) => r,
        };

        let change = match result {
            Ok(change) => change,
            Err(err) => {
                // No recovery: the modal stays in the loading state.
                error!(modal = self.id, error = %err, "{} failed", label);
                return;
            }
        };

        match change {
            PageChange::Full(FetchResult { items, total_count }) => {
                self.set_page_items(items);
                self.state.total_count = total_count;
            }
            PageChange::Items(items) => self.set_page_items(items),
        }
        self.state.is_loading = false;

        // A refresh keeps the selection on the same row when it survived.
        self.cursor = match selected_key.filter(|_| is_refresh) {
            Some(key) => self
                .state
                .items
                .iter()
                .position(|item| item.key() == key)
                .unwrap_or_else(|| self.cursor.min(self.state.items.len().saturating_sub(1))),
            _ => 0,
        };
        if !is_refresh {
            self.viewport_start = 0;
        }
        self.sync_viewport();
    }

    fn set_page_items(&mut self, mut items: Vec<I>) {
        if items.len() > self.page_size {
            warn!(
                modal = self.id,
                received = items.len(),
                page_size = self.page_size,
                "loader returned more rows than the page size, truncating"
            );
            items.truncate(self.page_size);
        }
        self.state.items = items;
    }
}

fn with_spinner(cmd: Cmd, restart: Option<Cmd>) -> Cmd {
    match restart {
        Some(tick) => bubbletea_rs::batch(vec![cmd, tick]),
        None => cmd,
    }
}
