//! Resource listing protocol
//!
//! Deterministic mapping from a [`ListQuery`] to the query parameters of one
//! idempotent GET, and the state machine a listing view drives. Two rules
//! hold everywhere:
//! - any search/filter/sort change resets `page` to 1, so a narrower result
//!   set can never leave the view on an out-of-range page;
//! - fetches are sequence-numbered, and only the latest issued fetch may
//!   publish its response (last-issued-wins, not last-arrived-wins).

use serde::Deserialize;

use crate::client::ApiError;

/// Items requested per page unless a view overrides it.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// User-facing sort choice, mapped to transport `(sortBy, order)` pairs.
///
/// No secondary sort key is sent: the order of equal-keyed items is whatever
/// the backend returns, a backend contract rather than a client guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently posted first
    #[default]
    Newest,
    /// Lowest application fees first
    FeesAsc,
    /// Highest application fees first
    FeesDesc,
}

impl SortKey {
    fn transport(self) -> (&'static str, Option<&'static str>) {
        match self {
            SortKey::Newest => ("postDate", None),
            SortKey::FeesAsc => ("applicationFees", None),
            SortKey::FeesDesc => ("applicationFees", Some("desc")),
        }
    }
}

/// One listing request: pagination plus the active search/filter/sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    search: String,
    category: Option<String>,
    degree: Option<String>,
    sort: SortKey,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            category: None,
            degree: None,
            sort: SortKey::default(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A query with a view-specific page size.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// A query sized by the configured page size.
    pub fn from_config(config: &crate::config::ListingConfig) -> Self {
        Self::with_page_size(config.page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn degree(&self) -> Option<&str> {
        self.degree.as_deref()
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Change the search term. Resets `page` to 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Change the category filter. Resets `page` to 1.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
        self.page = 1;
    }

    /// Change the degree filter. Resets `page` to 1.
    pub fn set_degree(&mut self, degree: Option<String>) {
        self.degree = degree.filter(|d| !d.is_empty());
        self.page = 1;
    }

    /// Change the sort choice. Resets `page` to 1.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to a page, leaving search/filter/sort untouched.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Query parameters of the GET this query maps to.
    ///
    /// `page` and `limit` are always present; `search` only when non-empty;
    /// filters only when set; `order` only for descending sorts.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category".to_string(), category.clone()));
        }
        if let Some(degree) = &self.degree {
            params.push(("degree".to_string(), degree.clone()));
        }
        let (sort_by, order) = self.sort.transport();
        params.push(("sortBy".to_string(), sort_by.to_string()));
        if let Some(order) = order {
            params.push(("order".to_string(), order.to_string()));
        }
        params
    }
}

/// Wire envelope of a collection endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// One page of results, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> From<ListEnvelope<T>> for ListResult<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        Self {
            items: envelope.items,
            // missing or zero pagination metadata means a single page
            total_pages: envelope.total_pages.filter(|p| *p >= 1).unwrap_or(1),
        }
    }
}

/// Handle for one issued fetch; only the latest may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// The state one listing view holds.
pub struct ListState<T> {
    query: ListQuery,
    seq: u64,
    items: Vec<T>,
    total_pages: u32,
    error: Option<String>,
}

impl<T> ListState<T> {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            seq: 0,
            items: Vec::new(),
            total_pages: 1,
            error: None,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.set_search(search);
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.query.set_category(category);
    }

    pub fn set_degree(&mut self, degree: Option<String>) {
        self.query.set_degree(degree);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.set_sort(sort);
    }

    /// Whether forward navigation is in range; the view disables the
    /// control at the boundary rather than relying on server validation.
    pub fn can_next(&self) -> bool {
        self.query.page() < self.total_pages
    }

    pub fn can_prev(&self) -> bool {
        self.query.page() > 1
    }

    /// Advance one page if in range. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.can_next() {
            self.query.set_page(self.query.page() + 1);
            true
        } else {
            false
        }
    }

    /// Go back one page if in range. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.can_prev() {
            self.query.set_page(self.query.page() - 1);
            true
        } else {
            false
        }
    }

    /// Record that a fetch is being issued for the current query.
    pub fn begin(&mut self) -> FetchTicket {
        self.seq += 1;
        FetchTicket(self.seq)
    }

    /// Publish a fetch outcome.
    ///
    /// Responses for anything but the latest ticket are discarded, so a slow
    /// earlier request can never overwrite a newer one. On failure the
    /// visible set becomes empty with an error message, never a partial
    /// merge. Returns whether the outcome was applied.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<ListResult<T>, ApiError>,
    ) -> bool {
        if ticket.0 != self.seq {
            tracing::debug!(
                stale = ticket.0,
                latest = self.seq,
                "Discarding stale listing response"
            );
            return false;
        }
        match outcome {
            Ok(result) => {
                self.items = result.items;
                self.total_pages = result.total_pages.max(1);
                self.error = None;
            }
            Err(e) => {
                self.items.clear();
                self.total_pages = 1;
                self.error = Some(e.to_string());
            }
        }
        true
    }
}
