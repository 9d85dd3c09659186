//! The modal's data boundary.
//!
//! A [`Loader`] answers the three questions the modal asks: the first page on
//! mount, another page of the current search, and the first page of a new
//! search. Everything about where the data comes from is up to the
//! implementation.
//!
//! Loaders can be a type implementing the trait or three closures passed to
//! [`loader_fn`]:
//!
//! ```rust
//! use bubbletea_list_modal::modal::{loader_fn, FetchResult, PageChange};
//! use futures::FutureExt;
//!
//! let loader = loader_fn(
//!     || async { Ok(FetchResult::new(vec!["a".to_string()], 1)) }.boxed(),
//!     |_page, _term| async { Ok(PageChange::Items(Vec::<String>::new())) }.boxed(),
//!     |_term| async { Ok(FetchResult::empty()) }.boxed(),
//! );
//! # let _ = loader;
//! ```

use super::types::{FetchResult, PageChange};
use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Supplies pages to a modal.
#[async_trait]
pub trait Loader<I>: Send + Sync {
    /// First page, called once when the modal is initialized.
    async fn initial_load(&self) -> Result<FetchResult<I>>;

    /// Page `page` (zero-based) of the results for `search_term`.
    ///
    /// Also used to reload the current page after a row action.
    async fn on_page_change(&self, page: usize, search_term: &str) -> Result<PageChange<I>>;

    /// First page of the results for `term`. An empty term should give the
    /// same rows as [`Loader::initial_load`].
    async fn on_search_input(&self, term: &str) -> Result<FetchResult<I>>;
}

type InitialFn<I> = dyn Fn() -> BoxFuture<'static, Result<FetchResult<I>>> + Send + Sync;
type PageFn<I> = dyn Fn(usize, String) -> BoxFuture<'static, Result<PageChange<I>>> + Send + Sync;
type SearchFn<I> = dyn Fn(String) -> BoxFuture<'static, Result<FetchResult<I>>> + Send + Sync;

/// A [`Loader`] built from closures. See [`loader_fn`].
pub struct FnLoader<I> {
    initial: Box<InitialFn<I>>,
    page: Box<PageFn<I>>,
    search: Box<SearchFn<I>>,
}

/// Builds a loader from an initial-load, a page-change and a search closure.
pub fn loader_fn<I, A, B, C>(initial: A, page: B, search: C) -> FnLoader<I>
where
    A: Fn() -> BoxFuture<'static, Result<FetchResult<I>>> + Send + Sync + 'static,
    B: Fn(usize, String) -> BoxFuture<'static, Result<PageChange<I>>> + Send + Sync + 'static,
    C: Fn(String) -> BoxFuture<'static, Result<FetchResult<I>>> + Send + Sync + 'static,
{
    FnLoader {
        initial: Box::new(initial),
        page: Box::new(page),
        search: Box::new(search),
    }
}

#[async_trait]
impl<I: Send + 'static> Loader<I> for FnLoader<I> {
    async fn initial_load(&self) -> Result<FetchResult<I>> {
        (self.initial)().await
    }

    async fn on_page_change(&self, page: usize, search_term: &str) -> Result<PageChange<I>> {
        (self.page)(page, search_term.to_string()).await
    }

    async fn on_search_input(&self, term: &str) -> Result<FetchResult<I>> {
        (self.search)(term.to_string()).await
    }
}
