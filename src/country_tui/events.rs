//! Events delivered to the TUI loop from background tasks

use crate::api::ApiError;
use crate::models::{CountryDetail, CountryRow, PageResult};

/// Completed fetches, tagged with the token of the request that started them
#[derive(Debug)]
pub enum AppEvent {
    PageLoaded {
        token: u64,
        result: Result<PageResult<CountryRow>, ApiError>,
    },
    DetailLoaded {
        token: u64,
        result: Result<CountryDetail, ApiError>,
    },
}
