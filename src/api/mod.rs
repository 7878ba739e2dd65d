//! Country directory API
//!
//! The remote service owns storage, search, and pagination. This module
//! wraps its HTTP surface behind [`CountryApi`] so the TUI can run queries
//! on background tasks and tests can substitute a fake.

pub mod client;
pub mod errors;
pub mod legacy;
pub mod types;

pub use client::CountryClient;
pub use errors::ApiError;

use async_trait::async_trait;

use crate::models::{CountryDetail, CountryRow, FilterCriteria, PageRequest, PageResult};

/// Operations the views need from the directory service
#[async_trait]
pub trait CountryApi: Send + Sync {
    /// Run one paginated, sorted, filtered listing query
    async fn search_page(
        &self,
        filter: &FilterCriteria,
        page_request: &PageRequest,
    ) -> Result<PageResult<CountryRow>, ApiError>;

    /// Resolve a single country by its ISO3 code
    async fn country_detail(&self, iso3: &str) -> Result<CountryDetail, ApiError>;
}
