//! Paginated, filterable list controller used by the Users, FPOs, Products,
//! Brands and Service Providers screens.
//!
//! Every change to filters or pagination cancels the in-flight request and
//! issues a new one; only the response to the latest request is committed.

use tokio_util::sync::CancellationToken;

use crate::domain::filters::{FilterPatch, ListFilters};
use crate::domain::pagination::PageState;
use crate::dto::list::ListView;
use crate::dto::notice::Notice;
use crate::pagination::PageLinks;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ListQuery, Page, PageReader};

/// Whether a filter change returns the list to its first page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageReset {
    FirstPage,
    /// Keep the current page, e.g. for a search field debounced upstream.
    Keep,
}

/// Request for one page, owned by the generation that issued it.
#[derive(Debug)]
pub struct PageRequest {
    generation: u64,
    query: ListQuery,
    cancel: CancellationToken,
}

impl PageRequest {
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetches the page, resolving early with [`RepositoryError::Cancelled`]
    /// once the request has been superseded.
    pub async fn send<T, R>(self, reader: &R) -> PageResponse<T>
    where
        R: PageReader<T> + ?Sized,
    {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepositoryError::Cancelled),
            result = reader.fetch_page(&self.query) => result,
        };

        PageResponse {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug)]
pub struct PageResponse<T> {
    generation: u64,
    pub result: RepositoryResult<Page<T>>,
}

#[derive(Debug)]
pub struct ListController<T> {
    defaults: ListFilters,
    filters: ListFilters,
    pagination: PageState,
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    loaded: bool,
    generation: u64,
    in_flight: Option<CancellationToken>,
    scope: CancellationToken,
}

impl<T> ListController<T> {
    pub fn new(defaults: ListFilters, page_size: usize) -> Self {
        Self {
            filters: defaults.clone(),
            defaults,
            pagination: PageState::new(page_size),
            items: Vec::new(),
            loading: false,
            error: None,
            loaded: false,
            generation: 0,
            in_flight: None,
            scope: CancellationToken::new(),
        }
    }

    /// Reloads the current filters and page.
    pub fn refresh(&mut self) -> PageRequest {
        self.issue()
    }

    /// Shallow-merges `patch` into the filters and returns to the first page.
    pub fn set_filters(&mut self, patch: FilterPatch) -> PageRequest {
        self.update_filters(patch, PageReset::FirstPage)
    }

    pub fn update_filters(&mut self, patch: FilterPatch, reset: PageReset) -> PageRequest {
        self.filters.merge(patch);
        if reset == PageReset::FirstPage {
            self.pagination.first_page();
        }
        self.issue()
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> PageRequest {
        self.set_filters(FilterPatch::search(text))
    }

    pub fn set_page(&mut self, page: usize) -> PageRequest {
        self.pagination.go_to(page);
        self.issue()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> PageRequest {
        self.pagination.resize(page_size);
        self.issue()
    }

    /// Restores the default filters and returns to the first page.
    pub fn clear_filters(&mut self) -> PageRequest {
        self.filters = self.defaults.clone();
        self.pagination.first_page();
        self.issue()
    }

    /// Switches to a new upstream scope (e.g. another country): drops the
    /// current rows at once, installs `defaults` and starts over from page one.
    pub fn reset_scope(&mut self, defaults: ListFilters) -> PageRequest {
        self.cancel_in_flight();
        self.defaults = defaults;
        self.filters = self.defaults.clone();
        self.pagination.reset();
        self.items.clear();
        self.error = None;
        self.loaded = false;
        self.issue()
    }

    /// Commits `response` if it answers the latest request.
    ///
    /// Returns a notice for failures that should be shown to the user.
    pub fn apply(&mut self, response: PageResponse<T>) -> Option<Notice> {
        if response.generation != self.generation {
            log::debug!(
                "Discarding page response {} superseded by {}",
                response.generation,
                self.generation
            );
            return None;
        }
        if matches!(response.result, Err(RepositoryError::Cancelled)) {
            return None;
        }

        self.in_flight = None;
        self.loading = false;

        match response.result {
            Ok(page) => {
                self.items = page.items;
                self.pagination
                    .set_totals(page.page, page.total_items, page.total_pages);
                self.error = None;
                self.loaded = true;
                None
            }
            Err(err) => {
                log::error!("Failed to load list page: {err}");
                if !self.loaded {
                    self.items.clear();
                }
                let message = format!("Failed to load data: {err}");
                self.error = Some(message.clone());
                Some(Notice::error(message))
            }
        }
    }

    /// Sends `request` and applies its response.
    pub async fn reload<R>(&mut self, reader: &R, request: PageRequest) -> Option<Notice>
    where
        R: PageReader<T> + ?Sized,
    {
        let response = request.send(reader).await;
        self.apply(response)
    }

    /// Cancels the in-flight request without issuing a new one.
    pub fn cancel(&mut self) {
        self.cancel_in_flight();
        self.generation += 1;
        self.loading = false;
    }

    pub fn filters(&self) -> &ListFilters {
        &self.filters
    }

    pub fn pagination(&self) -> PageState {
        self.pagination
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> ListView<'_, T> {
        ListView {
            items: &self.items,
            filters: &self.filters,
            pagination: self.pagination,
            page_links: PageLinks::new(
                self.pagination.current_page(),
                self.pagination.total_pages(),
            ),
            loading: self.loading,
            error: self.error.as_deref(),
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    fn issue(&mut self) -> PageRequest {
        self.cancel_in_flight();
        self.generation += 1;
        self.loading = true;

        let cancel = self.scope.child_token();
        self.in_flight = Some(cancel.clone());

        PageRequest {
            generation: self.generation,
            query: ListQuery::new(self.filters.clone()).paginate(
                self.pagination.current_page(),
                self.pagination.page_size(),
            ),
            cancel,
        }
    }
}

impl<T> Drop for ListController<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;
    use crate::domain::filters::HasLocation;

    /// Serves `total` rows named `"{search}#{n}"`, failing while `fail` is set.
    struct Rows {
        total: usize,
        fail: Mutex<bool>,
        queries: Mutex<Vec<ListQuery>>,
    }

    impl Rows {
        fn new(total: usize) -> Self {
            Self {
                total,
                fail: Mutex::new(false),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn set_failing(&self, fail: bool) {
            *self.fail.lock().expect("lock poisoned") = fail;
        }

        fn queries(&self) -> Vec<ListQuery> {
            self.queries.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl PageReader<String> for Rows {
        async fn fetch_page(&self, query: &ListQuery) -> RepositoryResult<Page<String>> {
            self.queries
                .lock()
                .expect("lock poisoned")
                .push(query.clone());
            if *self.fail.lock().expect("lock poisoned") {
                return Err(RepositoryError::Status(502));
            }

            let pagination = query.pagination.clone().expect("paginated query");
            let search = query.search.clone().unwrap_or_default();
            let start = (pagination.page - 1) * pagination.per_page;
            let end = (start + pagination.per_page).min(self.total);
            Ok(Page {
                items: (start..end).map(|n| format!("{search}#{n}")).collect(),
                page: pagination.page,
                total_items: self.total,
                total_pages: self.total.div_ceil(pagination.per_page),
            })
        }
    }

    async fn loaded(rows: &Rows, page_size: usize) -> ListController<String> {
        let mut controller = ListController::new(ListFilters::default(), page_size);
        let request = controller.refresh();
        assert!(controller.reload(rows, request).await.is_none());
        controller
    }

    #[tokio::test]
    async fn search_change_returns_to_first_page() {
        let rows = Rows::new(200);
        let mut controller = loaded(&rows, 20).await;
        let request = controller.set_page(3);
        controller.reload(&rows, request).await;
        assert_eq!(controller.pagination().current_page(), 3);

        let request = controller.set_search("ravi");

        assert_eq!(controller.pagination().current_page(), 1);
        assert_eq!(request.query().search.as_deref(), Some("ravi"));
        assert_eq!(
            request.query().pagination.as_ref().map(|p| p.page),
            Some(1)
        );
        controller.reload(&rows, request).await;
        assert_eq!(controller.items()[0], "ravi#0");
    }

    #[tokio::test]
    async fn every_filter_mutation_resets_page() {
        let rows = Rows::new(500);
        let patches = [
            FilterPatch::search("a"),
            FilterPatch::field("role", Some("farmer".to_string())),
            FilterPatch::has_location(HasLocation::No),
            FilterPatch::location(None),
            FilterPatch::date_range(None, None),
        ];

        for patch in patches {
            let mut controller = loaded(&rows, 10).await;
            let request = controller.set_page(7);
            controller.reload(&rows, request).await;

            let request = controller.set_filters(patch);

            assert_eq!(controller.pagination().current_page(), 1);
            assert_eq!(request.query().pagination.as_ref().map(|p| p.page), Some(1));
        }
    }

    #[tokio::test]
    async fn keep_page_opt_out_preserves_page() {
        let rows = Rows::new(500);
        let mut controller = loaded(&rows, 10).await;
        let request = controller.set_page(4);
        controller.reload(&rows, request).await;

        let request = controller.update_filters(FilterPatch::search("x"), PageReset::Keep);

        assert_eq!(request.query().pagination.as_ref().map(|p| p.page), Some(4));
    }

    #[tokio::test]
    async fn only_last_page_size_is_committed() {
        let rows = Rows::new(300);
        let mut controller = loaded(&rows, 50).await;
        let request = controller.set_page(2);
        controller.reload(&rows, request).await;

        let hundred = controller.set_page_size(100);
        assert_eq!(controller.pagination().current_page(), 1);
        let twenty_five = controller.set_page_size(25);
        assert_eq!(controller.pagination().current_page(), 1);
        assert!(hundred.is_cancelled());

        let latest = twenty_five.send(&rows).await;
        let stale = hundred.send(&rows).await;

        assert!(controller.apply(latest).is_none());
        assert!(controller.apply(stale).is_none());

        assert_eq!(controller.items().len(), 25);
        assert_eq!(controller.pagination().total_pages(), 12);
        assert_eq!(controller.pagination().page_size(), 25);
    }

    /// Holds each page size's response until its gate is released.
    struct Gated {
        gates: Mutex<HashMap<usize, oneshot::Receiver<()>>>,
        started: Mutex<Vec<usize>>,
    }

    impl Gated {
        fn new(sizes: &[usize]) -> (Self, Vec<oneshot::Sender<()>>) {
            let mut gates = HashMap::new();
            let mut releases = Vec::new();
            for size in sizes {
                let (tx, rx) = oneshot::channel();
                gates.insert(*size, rx);
                releases.push(tx);
            }
            let reader = Self {
                gates: Mutex::new(gates),
                started: Mutex::new(Vec::new()),
            };
            (reader, releases)
        }
    }

    #[async_trait]
    impl PageReader<String> for Gated {
        async fn fetch_page(&self, query: &ListQuery) -> RepositoryResult<Page<String>> {
            let size = query.pagination.as_ref().map_or(0, |p| p.per_page);
            self.started.lock().expect("lock poisoned").push(size);
            let gate = self.gates.lock().expect("lock poisoned").remove(&size);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(Page {
                items: vec![format!("size {size}")],
                page: 1,
                total_items: 1,
                total_pages: 1,
            })
        }
    }

    #[tokio::test]
    async fn hung_request_is_abandoned_when_superseded() {
        let (reader, _releases) = Gated::new(&[100]);
        let mut controller: ListController<String> =
            ListController::new(ListFilters::default(), 50);

        let hundred = controller.set_page_size(100);
        let (stale, latest) = tokio::join!(hundred.send(&reader), async {
            tokio::task::yield_now().await;
            let twenty_five = controller.set_page_size(25);
            twenty_five.send(&reader).await
        });

        assert_eq!(*reader.started.lock().expect("lock poisoned"), vec![100, 25]);
        assert!(matches!(stale.result, Err(RepositoryError::Cancelled)));

        controller.apply(latest);
        controller.apply(stale);
        assert_eq!(controller.items(), ["size 25".to_string()]);
        assert_eq!(controller.error(), None);
    }

    #[tokio::test]
    async fn older_response_arriving_late_is_ignored() {
        let rows = Rows::new(100);
        let mut controller = loaded(&rows, 10).await;

        let first = controller.set_search("first");
        let first_response = first.send(&rows).await;
        assert!(first_response.result.is_ok());

        let second = controller.set_search("second");
        let second_response = second.send(&rows).await;

        controller.apply(second_response);
        controller.apply(first_response);

        assert_eq!(controller.items()[0], "second#0");
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn failure_keeps_last_good_items() {
        let rows = Rows::new(40);
        let mut controller = loaded(&rows, 10).await;
        let before = controller.items().to_vec();

        rows.set_failing(true);
        let request = controller.set_page(2);
        let notice = controller.reload(&rows, request).await;

        assert!(notice.is_some());
        assert_eq!(controller.items(), before.as_slice());
        assert!(controller.error().is_some());
        assert!(!controller.is_loading());

        rows.set_failing(false);
        let request = controller.set_page(2);
        controller.reload(&rows, request).await;
        assert_eq!(controller.error(), None);
        assert_eq!(controller.items()[0], "#10");
    }

    #[tokio::test]
    async fn first_load_failure_leaves_list_empty() {
        let rows = Rows::new(40);
        rows.set_failing(true);
        let mut controller: ListController<String> =
            ListController::new(ListFilters::default(), 10);

        let request = controller.refresh();
        let notice = controller.reload(&rows, request).await;

        assert_eq!(
            notice.map(|n| n.message),
            Some("Failed to load data: Unexpected HTTP status 502".to_string())
        );
        assert!(controller.items().is_empty());
    }

    #[tokio::test]
    async fn clear_filters_restores_defaults() {
        let rows = Rows::new(40);
        let defaults = ListFilters::default().with_field("status", "active");
        let mut controller = ListController::new(defaults.clone(), 10);
        let request = controller.set_filters(FilterPatch::field("status", None));
        controller.reload(&rows, request).await;
        let request = controller.set_search("meena");
        controller.reload(&rows, request).await;

        let request = controller.clear_filters();

        assert_eq!(controller.filters(), &defaults);
        assert_eq!(request.query().search, None);
        assert_eq!(controller.pagination().current_page(), 1);
    }

    #[tokio::test]
    async fn scope_reset_drops_rows_and_cancels() {
        let rows = Rows::new(40);
        let mut controller = loaded(&rows, 10).await;
        let pending = controller.set_page(3);

        let request = controller.reset_scope(ListFilters::default().with_field("country", "NP"));

        assert!(pending.is_cancelled());
        assert!(controller.items().is_empty());
        assert_eq!(controller.pagination().total_pages(), 0);
        assert!(controller.is_loading());
        assert_eq!(
            request.query().filters.fields.get("country").map(String::as_str),
            Some("NP")
        );

        let stale = pending.send(&rows).await;
        assert!(matches!(stale.result, Err(RepositoryError::Cancelled)));
        controller.apply(stale);
        assert!(controller.items().is_empty());
    }

    #[tokio::test]
    async fn dropping_controller_cancels_in_flight_request() {
        let rows = Rows::new(40);
        let mut controller: ListController<String> =
            ListController::new(ListFilters::default(), 10);
        let request = controller.refresh();

        drop(controller);

        assert!(request.is_cancelled());
        assert!(rows.queries().is_empty());
    }

    #[tokio::test]
    async fn view_exposes_page_links() {
        let rows = Rows::new(95);
        let mut controller = loaded(&rows, 10).await;
        let request = controller.set_page(5);
        controller.reload(&rows, request).await;

        let view = controller.view();

        assert_eq!(view.items.len(), 10);
        assert_eq!(view.page_links.current, 5);
        assert_eq!(view.pagination.total_pages(), 10);
        assert!(!view.loading);
    }
}
