//! Page-number pagination over a fetch capability.
//!
//! [`PaginationVm`] is the standard [`PageLoader`]: it remembers the filter passed to
//! `first_page`, requests successive page numbers from a [`PageFetcher`], and
//! accumulates everything loaded so far. A page shorter than the page size marks the
//! end of the data.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::fmt;
use tracing::debug;

use super::PageLoader;
use crate::model::{FilterParams, LoadError, PageResult};

/// One request issued by [`PaginationVm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Filter established by `first_page`.
    pub params: FilterParams,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: usize,
}

impl PageRequest {
    /// Index of the first row of this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size
    }
}

/// Rows returned by one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage<T> {
    /// Rows of the requested page.
    pub items: Vec<T>,
    /// Total row count across all pages, if the backend reports it.
    pub total: Option<u64>,
}

/// Response bodies accepted by [`FetchedPage::from_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Envelope {
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T: DeserializeOwned> FetchedPage<T> {
    /// Decode a response body: either a bare JSON array or `{"items": [...], "total": n}`.
    ///
    /// ```
    /// use viewkit::pagination::FetchedPage;
    ///
    /// let page: FetchedPage<u32> = FetchedPage::from_json(r#"{"items": [1, 2], "total": 9}"#).unwrap();
    /// assert_eq!(page.items, vec![1, 2]);
    /// assert_eq!(page.total, Some(9));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Malformed` when the body matches neither shape.
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        match serde_json::from_str(body) {
            Ok(PageBody::Envelope { items, total }) => Ok(Self { items, total }),
            Ok(PageBody::Bare(items)) => Ok(Self { items, total: None }),
            Err(e) => Err(LoadError::Malformed(e.to_string())),
        }
    }
}

/// Fetches a single page of rows.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Row type.
    type Item;

    /// Fetch the rows described by `request`.
    async fn fetch(&self, request: &PageRequest) -> Result<FetchedPage<Self::Item>, LoadError>;
}

/// Accumulating page-number loader.
pub struct PaginationVm<F: PageFetcher> {
    fetcher: F,
    page_size: usize,
    params: RefCell<Option<FilterParams>>,
    page: Cell<u32>,
    collection: RefCell<Vec<F::Item>>,
    loading: Cell<bool>,
    last_page: Cell<bool>,
    total: Cell<Option<u64>>,
}

impl<F: PageFetcher> fmt::Debug for PaginationVm<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationVm")
            .field("page_size", &self.page_size)
            .field("page", &self.page.get())
            .field("loaded", &self.collection.borrow().len())
            .field("loading", &self.loading.get())
            .field("last_page", &self.last_page.get())
            .field("total", &self.total.get())
            .finish_non_exhaustive()
    }
}

impl<F: PageFetcher> PaginationVm<F> {
    /// Loader requesting `page_size` rows at a time (at least one).
    pub fn new(fetcher: F, page_size: usize) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
            params: RefCell::new(None),
            page: Cell::new(0),
            collection: RefCell::new(Vec::new()),
            loading: Cell::new(false),
            last_page: Cell::new(false),
            total: Cell::new(None),
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of the last page loaded; zero before the first load.
    pub fn current_page(&self) -> u32 {
        self.page.get()
    }

    /// The fetch capability.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    async fn fetch(&self, request: PageRequest) -> Result<FetchedPage<F::Item>, LoadError> {
        debug!(page = request.page, page_size = request.page_size, "fetching page");
        let _loading = LoadingGuard::start(&self.loading);
        self.fetcher.fetch(&request).await
    }
}

/// Holds the loading flag up for as long as a fetch is alive, including one that is
/// dropped before it completes.
struct LoadingGuard<'a>(&'a Cell<bool>);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<F> PaginationVm<F>
where
    F: PageFetcher,
    F::Item: Clone,
{
    fn absorb(&self, page: u32, fetched: FetchedPage<F::Item>, reset: bool) -> PageResult<F::Item> {
        let is_last_page = fetched.items.len() < self.page_size;
        self.page.set(page);
        self.last_page.set(is_last_page);
        self.total.set(fetched.total);

        let mut collection = self.collection.borrow_mut();
        if reset {
            *collection = fetched.items;
        } else {
            collection.extend(fetched.items);
        }

        PageResult::new(collection.clone(), is_last_page, fetched.total)
    }
}

impl<F> PageLoader for PaginationVm<F>
where
    F: PageFetcher,
    F::Item: Clone,
{
    type Item = F::Item;

    async fn first_page(&self, params: &FilterParams) -> Result<PageResult<F::Item>, LoadError> {
        *self.params.borrow_mut() = Some(params.clone());
        let request = PageRequest {
            params: params.clone(),
            page: 1,
            page_size: self.page_size,
        };

        let fetched = self.fetch(request).await?;
        Ok(self.absorb(1, fetched, true))
    }

    async fn next_page(&self) -> Result<PageResult<F::Item>, LoadError> {
        let params = self.params.borrow().clone().ok_or(LoadError::NotStarted)?;
        let page = self.page.get() + 1;
        let request = PageRequest {
            params,
            page,
            page_size: self.page_size,
        };

        let fetched = self.fetch(request).await?;
        Ok(self.absorb(page, fetched, false))
    }

    fn is_last_page(&self) -> bool {
        self.last_page.get()
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn with_collection<R>(&self, f: impl FnOnce(&[F::Item]) -> R) -> R {
        f(&self.collection.borrow())
    }

    fn total(&self) -> Option<u64> {
        self.total.get()
    }
}

/// Serves pages out of an in-memory list, ignoring filters.
#[derive(Debug, Clone, Default)]
pub struct VecFetcher<T> {
    rows: Vec<T>,
}

impl<T> VecFetcher<T> {
    /// Serve `rows`.
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Number of rows served.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there is nothing to serve.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Clone> PageFetcher for VecFetcher<T> {
    type Item = T;

    async fn fetch(&self, request: &PageRequest) -> Result<FetchedPage<T>, LoadError> {
        let start = request.offset().min(self.rows.len());
        let end = start.saturating_add(request.page_size).min(self.rows.len());
        Ok(FetchedPage {
            items: self.rows[start..end].to_vec(),
            total: Some(self.rows.len() as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterSet;

    fn numbers(count: u32) -> PaginationVm<VecFetcher<u32>> {
        PaginationVm::new(VecFetcher::new((1..=count).collect()), 2)
    }

    #[test]
    fn page_request_offset_is_zero_based() {
        let request = PageRequest {
            params: FilterParams::new(),
            page: 3,
            page_size: 10,
        };
        assert_eq!(request.offset(), 20);
    }

    #[tokio::test]
    async fn next_page_before_first_page_is_rejected() {
        let vm = numbers(5);
        assert_eq!(vm.next_page().await, Err(LoadError::NotStarted));
        assert_eq!(vm.current_page(), 0);
    }

    #[tokio::test]
    async fn pages_accumulate_until_short_page() {
        let vm = numbers(5);

        let first = vm.first_page(&FilterParams::new()).await.unwrap();
        assert_eq!(first.items, vec![1, 2]);
        assert!(!first.is_last_page);
        assert_eq!(first.total, Some(5));

        let second = vm.next_page().await.unwrap();
        assert_eq!(second.items, vec![1, 2, 3, 4]);
        assert!(!vm.is_last_page());

        let third = vm.next_page().await.unwrap();
        assert_eq!(third.items, vec![1, 2, 3, 4, 5]);
        assert!(third.is_last_page);
        assert_eq!(vm.current_page(), 3);
    }

    #[tokio::test]
    async fn exact_multiple_needs_an_empty_page_to_finish() {
        let vm = numbers(4);

        vm.first_page(&FilterParams::new()).await.unwrap();
        vm.next_page().await.unwrap();
        assert!(!vm.is_last_page());

        let done = vm.next_page().await.unwrap();
        assert!(done.is_last_page);
        assert_eq!(done.items.len(), 4);
    }

    #[tokio::test]
    async fn first_page_resets_collection_and_cursor() {
        let vm = numbers(5);
        vm.first_page(&FilterParams::new()).await.unwrap();
        vm.next_page().await.unwrap();

        let params = FilterSet::new().eq("user_id", 1).build();
        let again = vm.first_page(&params).await.unwrap();

        assert_eq!(again.items, vec![1, 2]);
        assert_eq!(vm.current_page(), 1);
        assert!(!vm.is_loading());
    }

    /// Fetcher that never answers within the test's patience.
    struct SlowFetcher;

    impl PageFetcher for SlowFetcher {
        type Item = u32;

        async fn fetch(&self, _request: &PageRequest) -> Result<FetchedPage<u32>, LoadError> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(FetchedPage {
                items: vec![1],
                total: Some(1),
            })
        }
    }

    #[tokio::test]
    async fn abandoned_fetch_clears_loading_flag() {
        let vm = PaginationVm::new(SlowFetcher, 10);

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(5),
            vm.first_page(&FilterParams::new()),
        )
        .await;

        assert!(abandoned.is_err(), "fetch should still be pending at the timeout");
        assert!(!vm.is_loading());
        assert_eq!(vm.current_page(), 0);
        assert!(vm.collection.borrow().is_empty());
    }

    #[tokio::test]
    async fn loading_flag_is_up_while_fetch_is_pending() {
        let vm = PaginationVm::new(SlowFetcher, 10);
        let params = FilterParams::new();
        let load = vm.first_page(&params);
        tokio::pin!(load);

        let pending = poll_once(load.as_mut()).await;
        assert!(pending);
        assert!(vm.is_loading());

        load.await.unwrap();
        assert!(!vm.is_loading());
    }

    /// Poll `fut` once; true if it is still pending.
    async fn poll_once<F: std::future::Future + Unpin>(mut fut: F) -> bool {
        std::future::poll_fn(|cx| {
            let poll = std::future::Future::poll(std::pin::Pin::new(&mut fut), cx);
            std::task::Poll::Ready(poll.is_pending())
        })
        .await
    }

    #[test]
    fn bare_array_body_has_no_total() {
        let page: FetchedPage<String> = FetchedPage::from_json(r#"["a", "b"]"#).unwrap();
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.total, None);
    }

    #[test]
    fn envelope_without_total_is_accepted() {
        let page: FetchedPage<u32> = FetchedPage::from_json(r#"{"items": []}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, None);
    }

    #[test]
    fn unexpected_body_is_malformed() {
        let err = FetchedPage::<u32>::from_json(r#"{"rows": [1]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
        assert!(err.to_string().starts_with("malformed page response"));
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let vm = PaginationVm::new(VecFetcher::<u8>::new(vec![]), 0);
        assert_eq!(vm.page_size(), 1);
    }
}
