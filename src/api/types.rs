//! Request and response envelopes of the country directory API

use serde::{Deserialize, Serialize};

use crate::models::{CountryDetail, FilterCriteria, PageRequest};

/// Body of `POST /api/countries`: filter fields at the top level plus a nested page request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySearchRequest<'a> {
    #[serde(flatten)]
    pub filter: &'a FilterCriteria,
    pub page_request: &'a PageRequest,
}

/// Body of `GET /api/countries/{iso3}`
#[derive(Debug, Deserialize)]
pub struct CountryDetailResponse {
    #[serde(default)]
    pub country: Option<CountryDetail>,
}

/// Error body returned by the server on non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub status: Option<u16>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn describe(&self) -> Option<String> {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.clone())
    }
}

/// Country API endpoints
pub struct CountryEndpoints;

impl CountryEndpoints {
    /// Paginated, sorted, filtered listing
    pub const SEARCH_PAGE: &'static str = "/api/countries";
    /// Single country by ISO3 (path prefix)
    pub const DETAIL: &'static str = "/api/countries";
    /// Unpaginated listing of the legacy revision
    pub const LEGACY_TABLE: &'static str = "/api/country-table";
    /// Filter-only search of the legacy revision
    pub const LEGACY_SEARCH: &'static str = "/api/countries/search";
    /// Single country by ISO3 in the legacy revision (path prefix)
    pub const LEGACY_DETAIL: &'static str = "/api/country-detail";
}
