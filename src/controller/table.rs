//! Pagination, sort, and filter coordination for the country table

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::config::PAGE_SIZE_OPTIONS;
use crate::controller::Route;
use crate::models::{CountryRow, FilterCriteria, PageRequest, PageResult, SortField, SortOrder};

/// One outbound listing query, tagged with the token its response must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub token: u64,
    pub filter: FilterCriteria,
    pub page_request: PageRequest,
}

/// What `apply_response` did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Rows and totals replaced
    Applied,
    /// Latest query failed; previous rows kept
    Failed,
    /// A newer query was issued since; response ignored
    Stale,
}

/// State behind the country table
#[derive(Debug, Clone)]
pub struct TableController {
    page: u32,
    size: u32,
    sort: SortOrder,
    filter: FilterCriteria,
    rows: Vec<CountryRow>,
    total_elements: u64,
    total_pages: u32,
    /// Page index of the rows currently held
    shown_page: u32,
    latest_token: u64,
    loading: bool,
}

impl TableController {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            size: page_size.max(1),
            sort: SortOrder::ascending(SortField::Name),
            filter: FilterCriteria::default(),
            rows: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            shown_page: 0,
            latest_token: 0,
            loading: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page the held rows belong to; lags `page` while a query is pending or after it failed
    pub fn shown_page(&self) -> u32 {
        self.shown_page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// True while the latest issued query has not been answered
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Page request reflecting the current state
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size, self.sort)
    }

    /// Seed filter and paging before the first query without issuing one
    pub fn preset(&mut self, filter: FilterCriteria, request: &PageRequest) {
        self.filter = filter;
        self.page = request.page;
        self.size = request.size.max(1);
        if let Some(order) = request.sort.first() {
            self.sort = *order;
        }
    }

    /// Query for the first screen of data
    pub fn initial_query(&mut self) -> QueryTicket {
        self.issue()
    }

    /// Re-issue the current query unchanged
    pub fn refresh(&mut self) -> QueryTicket {
        self.issue()
    }

    /// Replace the filter and go back to the first page
    pub fn apply_filter(&mut self, criteria: FilterCriteria) -> QueryTicket {
        info!("Applying filter: {:?}", criteria);
        self.filter = criteria;
        self.page = 0;
        self.issue()
    }

    /// Sort by `field`; activating the current field flips its direction
    pub fn change_sort(&mut self, field: SortField) -> QueryTicket {
        self.sort = if self.sort.field == field {
            self.sort.flipped()
        } else {
            SortOrder::ascending(field)
        };
        self.page = 0;
        self.issue()
    }

    pub fn change_page(&mut self, page: u32) -> QueryTicket {
        self.page = page;
        self.issue()
    }

    /// Change the page size and go back to the first page
    pub fn change_page_size(&mut self, size: u32) -> QueryTicket {
        self.size = size.max(1);
        self.page = 0;
        self.issue()
    }

    /// Move to the next entry of [`PAGE_SIZE_OPTIONS`]
    pub fn cycle_page_size(&mut self) -> QueryTicket {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&s| s > self.size)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.change_page_size(next)
    }

    pub fn next_page(&mut self) -> Option<QueryTicket> {
        let next = self.page.checked_add(1).filter(|&n| n < self.total_pages)?;
        Some(self.change_page(next))
    }

    pub fn previous_page(&mut self) -> Option<QueryTicket> {
        (self.page > 0).then(|| self.change_page(self.page - 1))
    }

    pub fn first_page(&mut self) -> Option<QueryTicket> {
        (self.page != 0).then(|| self.change_page(0))
    }

    pub fn last_page(&mut self) -> Option<QueryTicket> {
        let last = self.total_pages.checked_sub(1)?;
        (self.page != last).then(|| self.change_page(last))
    }

    /// Route to the detail view of the row at `index` on the current page
    pub fn activate_row(&self, index: usize) -> Option<Route> {
        self.rows.get(index).map(|row| Route::Country {
            iso3: row.iso3.clone(),
        })
    }

    /// Apply the response of the query identified by `token`
    pub fn apply_response(
        &mut self,
        token: u64,
        result: Result<PageResult<CountryRow>, ApiError>,
    ) -> ResponseOutcome {
        if token != self.latest_token {
            debug!("Discarding stale country page (token {} < {})", token, self.latest_token);
            return ResponseOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.rows = page.content;
                self.total_elements = page.total_elements;
                self.total_pages = page.total_pages;
                self.shown_page = self.page;
                ResponseOutcome::Applied
            }
            Err(e) => {
                warn!("Country query failed, keeping previous rows: {}", e);
                ResponseOutcome::Failed
            }
        }
    }

    fn issue(&mut self) -> QueryTicket {
        self.latest_token += 1;
        self.loading = true;
        QueryTicket {
            token: self.latest_token,
            filter: self.filter.clone(),
            page_request: self.page_request(),
        }
    }
}
