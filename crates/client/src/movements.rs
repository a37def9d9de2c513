//! Cache-aware movement loading and the movements page state.
//!
//! The first load of a range fetches it unfiltered and stores the whole
//! result; every later filter or page change for that range is answered
//! locally until the entry expires.

use chrono::NaiveDate;
use finnza_core::clock::{Clock, SystemClock};
use finnza_core::date_range::{DateRange, DateRangePicker};
use finnza_core::debounce::Debouncer;
use finnza_core::movement::{
    CacheEntry, Movement, MovementCache, MovementFilter, MovementKind, MovementTotals, categories,
    filter_page,
};
use finnza_core::request::{RequestTicket, RequestTracker};
use finnza_shared::AppResult;
use finnza_shared::config::{MovementsConfig, SearchConfig};
use finnza_shared::types::{PageRequest, PageResponse, visible_pages};
use tracing::{debug, info, warn};

use crate::sources::{MovementBatch, MovementQuery, MovementSource};

/// Message shown when a load fails without a backend message.
pub const LOAD_ERROR: &str = "Erro ao carregar movimentações";

/// Pages shown in the pager strip.
const PAGER_WINDOW: u32 = 5;

/// What the page wants to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRequest {
    /// Committed period.
    pub range: DateRange,
    /// UI filters.
    pub filter: MovementFilter,
    /// Page to show.
    pub page: PageRequest,
}

/// What the page displays.
#[derive(Debug, Clone)]
pub struct MovementView {
    /// The visible slice and its pagination.
    pub page: PageResponse<Movement>,
    /// Totals over the whole range, independent of filters.
    pub totals: MovementTotals,
    /// Category drop-down options.
    pub categories: Vec<String>,
    /// Whether the view was served without a request.
    pub from_cache: bool,
}

impl MovementView {
    fn from_entry(entry: &CacheEntry, request: &MovementRequest, from_cache: bool) -> Self {
        Self {
            page: filter_page(&entry.movements, &request.filter, request.page),
            totals: entry.totals,
            categories: categories(&entry.movements),
            from_cache,
        }
    }
}

/// Loads movements through the per-range cache.
pub struct MovementService<S, C: Clock = SystemClock> {
    source: S,
    cache: MovementCache<C>,
    fetch_page_size: u32,
}

impl<S: MovementSource, C: Clock> MovementService<S, C> {
    /// Creates a service; ranges are fetched `fetch_page_size` rows per request.
    pub fn new(source: S, cache: MovementCache<C>, fetch_page_size: u32) -> Self {
        Self {
            source,
            cache,
            fetch_page_size,
        }
    }

    /// Serves `request` from the cache, fetching the range on a miss.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn load(&self, request: &MovementRequest) -> AppResult<MovementView> {
        if let Some(entry) = self.cache.get(&request.range) {
            return Ok(MovementView::from_entry(&entry, request, true));
        }

        let batch = self.fetch_range(request.range).await.inspect_err(|err| {
            warn!(
                source = %self.source.upstream(),
                range = %request.range,
                code = err.error_code(),
                "Movement fetch failed"
            );
        })?;

        info!(
            source = %self.source.upstream(),
            range = %request.range,
            items = batch.movements.len(),
            total = batch.total,
            "Movements fetched"
        );
        let entry = self.cache.put(&request.range, batch.movements, batch.totals);
        Ok(MovementView::from_entry(&entry, request, false))
    }

    /// Every unfiltered row of `range`, page after page.
    ///
    /// Stops once the reported total is reached or a page comes back empty.
    async fn fetch_range(&self, range: DateRange) -> AppResult<MovementBatch> {
        let mut query = MovementQuery::unfiltered(range, self.fetch_page_size);
        let mut batch = self.source.fetch(&query).await?;

        while (batch.movements.len() as u64) < batch.total {
            query.page += 1;
            let next = self.source.fetch(&query).await?;
            if next.movements.is_empty() {
                warn!(
                    range = %range,
                    items = batch.movements.len(),
                    total = batch.total,
                    "Upstream ran out of rows before its reported total"
                );
                break;
            }
            debug!(page = query.page, items = next.movements.len(), "Movement page fetched");
            batch.movements.extend(next.movements);
        }

        if !batch.server_totals {
            batch.totals = MovementTotals::from_movements(&batch.movements);
        }
        Ok(batch)
    }

    /// Drops every cached range.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// The underlying cache.
    pub const fn cache(&self) -> &MovementCache<C> {
        &self.cache
    }
}

/// State of the movements page.
pub struct MovementsPage<S, C: Clock = SystemClock> {
    service: MovementService<S, C>,
    clock: C,
    picker: DateRangePicker,
    search: Debouncer<String>,
    tracker: RequestTracker,
    filter: MovementFilter,
    page: u32,
    page_size: u32,
    view: Option<MovementView>,
    error: Option<String>,
}

impl<S: MovementSource, C: Clock> MovementsPage<S, C> {
    /// An unloaded page over an unbounded range.
    pub fn new(
        service: MovementService<S, C>,
        clock: C,
        movements: &MovementsConfig,
        search: &SearchConfig,
    ) -> Self {
        let today = clock.now().date_naive();
        Self {
            service,
            picker: DateRangePicker::new(DateRange::unbounded(), today),
            clock,
            search: Debouncer::from_config(search),
            tracker: RequestTracker::new(),
            filter: MovementFilter::default(),
            page: 1,
            page_size: movements.page_size,
            view: None,
            error: None,
        }
    }

    /// Today according to the page clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// The request the current state describes.
    pub fn request(&self) -> MovementRequest {
        MovementRequest {
            range: self.picker.committed(),
            filter: self.filter.clone(),
            page: PageRequest::new(self.page, self.page_size),
        }
    }

    /// Issues a ticket for a reload of the current state.
    pub fn begin_load(&self) -> (RequestTicket, MovementRequest) {
        (self.tracker.begin(), self.request())
    }

    /// Applies a load result unless a newer load has started since.
    ///
    /// On failure the previous view is kept and `error` is set. Returns
    /// whether the result was applied.
    pub fn finish_load(&mut self, ticket: RequestTicket, result: AppResult<MovementView>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(ticket = ticket.sequence(), "Dropping superseded movement response");
            return false;
        }
        match result {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(err) => self.error = Some(err.user_message(LOAD_ERROR)),
        }
        true
    }

    /// Reloads the current state.
    pub async fn reload(&mut self) -> bool {
        let (ticket, request) = self.begin_load();
        let result = self.service.load(&request).await;
        self.finish_load(ticket, result)
    }

    /// The date range picker.
    pub const fn picker(&self) -> &DateRangePicker {
        &self.picker
    }

    /// The date range picker, for open/select/hover/navigation.
    pub fn picker_mut(&mut self) -> &mut DateRangePicker {
        &mut self.picker
    }

    /// Commits the picker selection and reloads when a range was applied.
    pub async fn apply_range(&mut self) -> bool {
        if self.picker.apply().is_none() {
            return false;
        }
        self.page = 1;
        self.reload().await
    }

    /// Clears the period, dropping the cache when it actually changed.
    pub async fn clear_range(&mut self) -> bool {
        if self.picker.clear() {
            debug!("Period cleared, invalidating movement cache");
            self.service.invalidate();
        }
        self.page = 1;
        self.reload().await
    }

    /// Sets the revenue/expense filter.
    pub async fn set_kind(&mut self, kind: Option<MovementKind>) -> bool {
        self.filter.kind = kind;
        self.page = 1;
        self.reload().await
    }

    /// Sets the category filter.
    pub async fn set_category(&mut self, category: Option<String>) -> bool {
        self.filter.category = category.filter(|c| !c.is_empty());
        self.page = 1;
        self.reload().await
    }

    /// Records a keystroke in the search box.
    pub fn type_search(&mut self, text: &str) {
        self.search.push(text.to_string(), self.clock.now());
    }

    /// Applies the search text once typing has paused.
    ///
    /// Returns whether a reload happened.
    pub async fn poll_search(&mut self) -> bool {
        let Some(text) = self.search.poll(self.clock.now()) else {
            return false;
        };
        self.filter.search_text = Some(text).filter(|t| !t.trim().is_empty());
        self.page = 1;
        self.reload().await
    }

    /// Drops every UI filter.
    pub async fn clear_filters(&mut self) -> bool {
        self.filter = MovementFilter::default();
        self.search.reset();
        self.page = 1;
        self.reload().await
    }

    /// Jumps to `page` when it exists.
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages() || page == self.page {
            return false;
        }
        self.page = page;
        self.reload().await
    }

    /// Next page, if any.
    pub async fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1).await
    }

    /// Previous page, if any.
    pub async fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1)).await
    }

    /// Current page (1-indexed).
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Pages available for the current filters.
    pub fn total_pages(&self) -> u32 {
        self.view.as_ref().map_or(1, |v| v.page.meta.total_pages)
    }

    /// Page numbers for the pager strip.
    pub fn visible_pages(&self) -> Vec<u32> {
        visible_pages(self.page, self.total_pages(), PAGER_WINDOW)
    }

    /// Active filters.
    pub const fn filter(&self) -> &MovementFilter {
        &self.filter
    }

    /// Last good view, if any load succeeded.
    pub const fn view(&self) -> Option<&MovementView> {
        self.view.as_ref()
    }

    /// Visible movements; empty before the first successful load.
    pub fn movements(&self) -> &[Movement] {
        self.view.as_ref().map_or(&[][..], |v| v.page.data.as_slice())
    }

    /// Message of the last failed load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The movement service.
    pub const fn service(&self) -> &MovementService<S, C> {
        &self.service
    }
}
