//! Paged loading with error capture and redraw on settlement.
//!
//! [`PaginationController`] wraps any [`PageLoader`]. Every settled request, success
//! or failure, updates the controller's error state and schedules exactly one redraw,
//! so an error banner appears on screen even though the caller also receives the error.
//!
//! Loading progress (`is_loading`, `is_last_page`, the collection and the total) is
//! never copied: the controller reads it from the loader on every call, which keeps
//! in-flight requests visible to views.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};

use crate::model::{FilterParams, LoadError, PageResult};
use crate::scheduler::RedrawScheduler;

pub mod vm;

pub use vm::{FetchedPage, PageFetcher, PageRequest, PaginationVm, VecFetcher};

/// A paged data source with its own cursor.
///
/// Implementations keep their state behind interior mutability so it can be read
/// while a request is outstanding.
#[allow(async_fn_in_trait)]
pub trait PageLoader {
    /// Row type.
    type Item: Clone;

    /// Load the first page matching `params`, resetting the cursor.
    async fn first_page(&self, params: &FilterParams) -> Result<PageResult<Self::Item>, LoadError>;

    /// Load the page after the last one loaded.
    async fn next_page(&self) -> Result<PageResult<Self::Item>, LoadError>;

    /// True once the final page has been loaded.
    fn is_last_page(&self) -> bool;

    /// True while a request is outstanding.
    fn is_loading(&self) -> bool;

    /// Run `f` over the items loaded so far.
    fn with_collection<R>(&self, f: impl FnOnce(&[Self::Item]) -> R) -> R;

    /// Total row count reported by the backend.
    fn total(&self) -> Option<u64>;
}

/// Snapshot of everything a paginated view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState<T> {
    /// Items loaded so far.
    pub items: Vec<T>,
    /// A request is outstanding.
    pub is_loading: bool,
    /// No further page exists.
    pub is_last_page: bool,
    /// Backend total, if reported.
    pub total: Option<u64>,
    /// The last settled request failed.
    pub error: bool,
    /// Reason for the last failure; empty after a success.
    pub error_message: String,
}

#[derive(Debug, Default)]
struct ControllerState {
    error: Cell<bool>,
    error_message: RefCell<String>,
    unmounted: Cell<bool>,
}

/// Pagination wrapper owned by one view component.
///
/// Clones share the loader and the error state.
#[derive(Debug)]
pub struct PaginationController<L> {
    loader: Rc<L>,
    state: Rc<ControllerState>,
    scheduler: RedrawScheduler,
}

impl<L> Clone for PaginationController<L> {
    fn clone(&self) -> Self {
        Self {
            loader: Rc::clone(&self.loader),
            state: Rc::clone(&self.state),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<L: PageLoader> PaginationController<L> {
    /// Wrap `loader`, scheduling redraws through `scheduler`.
    pub fn new(loader: L, scheduler: RedrawScheduler) -> Self {
        Self::from_shared(Rc::new(loader), scheduler)
    }

    /// Wrap a loader that other components also hold.
    pub fn from_shared(loader: Rc<L>, scheduler: RedrawScheduler) -> Self {
        Self {
            loader,
            state: Rc::new(ControllerState::default()),
            scheduler,
        }
    }

    /// Load the first page matching `params`.
    ///
    /// Resolves with the loader's items. Calls are not deduplicated: each starts a
    /// new request.
    ///
    /// # Errors
    ///
    /// Returns the loader's error after recording it in [`error_message`](Self::error_message).
    pub async fn first_page(&self, params: &FilterParams) -> Result<Vec<L::Item>, LoadError> {
        debug!(?params, "loading first page");
        let outcome = self.loader.first_page(params).await;
        self.settle(outcome)
    }

    /// Load the next page using the loader's cursor.
    ///
    /// # Errors
    ///
    /// Returns the loader's error after recording it in [`error_message`](Self::error_message).
    pub async fn next_page(&self) -> Result<Vec<L::Item>, LoadError> {
        debug!("loading next page");
        let outcome = self.loader.next_page().await;
        self.settle(outcome)
    }

    fn settle(
        &self,
        outcome: Result<PageResult<L::Item>, LoadError>,
    ) -> Result<Vec<L::Item>, LoadError> {
        if self.state.unmounted.get() {
            debug!(ok = outcome.is_ok(), "page settled after unmount; state untouched");
            return outcome.map(|page| page.items);
        }

        let result = match outcome {
            Ok(page) => {
                self.state.error.set(false);
                self.state.error_message.borrow_mut().clear();
                debug!(items = page.items.len(), last = page.is_last_page, "page loaded");
                Ok(page.items)
            }
            Err(err) => {
                warn!(error = %err, "page load failed");
                self.state.error.set(true);
                *self.state.error_message.borrow_mut() = err.to_string();
                Err(err)
            }
        };

        self.scheduler.schedule();
        result
    }

    /// Detach from the view. Requests settling afterwards leave state alone and do
    /// not schedule redraws.
    pub fn unmount(&self) {
        self.state.unmounted.set(true);
    }

    /// False after [`unmount`](Self::unmount).
    pub fn is_mounted(&self) -> bool {
        !self.state.unmounted.get()
    }

    /// The last settled request failed.
    pub fn error(&self) -> bool {
        self.state.error.get()
    }

    /// Failure reason of the last settled request, empty after a success.
    pub fn error_message(&self) -> String {
        self.state.error_message.borrow().clone()
    }

    /// Live view of the loader's last-page flag.
    pub fn is_last_page(&self) -> bool {
        self.loader.is_last_page()
    }

    /// Live view of the loader's loading flag.
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Live view of the loader's total.
    pub fn total(&self) -> Option<u64> {
        self.loader.total()
    }

    /// Run `f` over the loader's collection without copying it.
    pub fn with_collection<R>(&self, f: impl FnOnce(&[L::Item]) -> R) -> R {
        self.loader.with_collection(f)
    }

    /// Copy of the loader's collection.
    pub fn collection(&self) -> Vec<L::Item> {
        self.loader.with_collection(<[L::Item]>::to_vec)
    }

    /// Everything a view needs, read at once.
    pub fn state(&self) -> PaginationState<L::Item> {
        PaginationState {
            items: self.collection(),
            is_loading: self.is_loading(),
            is_last_page: self.is_last_page(),
            total: self.total(),
            error: self.error(),
            error_message: self.error_message(),
        }
    }

    /// The wrapped loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
