//! HTTP client for the country directory API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::legacy;
use crate::api::types::{
    CountryDetailResponse, CountryEndpoints, CountrySearchRequest, ErrorResponse,
};
use crate::api::{ApiError, CountryApi};
use crate::config::{ApiRevision, Config};
use crate::models::{CountryDetail, CountryRow, FilterCriteria, PageRequest, PageResult};

/// `reqwest` backed implementation of [`CountryApi`]
#[derive(Debug, Clone)]
pub struct CountryClient {
    http: Client,
    base_url: String,
    revision: ApiRevision,
}

impl CountryClient {
    /// Build a client from application configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Self::with_http_client(http, config.api_base_url_str(), config.api_revision)
    }

    /// Build a client around an existing `reqwest::Client`
    pub fn with_http_client(
        http: Client,
        base_url: &str,
        revision: ApiRevision,
    ) -> Result<Self, ApiError> {
        reqwest::Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            revision,
        })
    }

    pub fn revision(&self) -> ApiRevision {
        self.revision
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// `endpoint/{iso3}` with the code percent-encoded as one path segment
    fn detail_url(&self, endpoint: &str, iso3: &str) -> Result<reqwest::Url, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url =
            reqwest::Url::parse(&self.url(endpoint)).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot carry path segments".to_string()))?
            .push(iso3.trim());
        Ok(url)
    }

    /// Unpaginated listing of every country (legacy revision)
    pub async fn country_table(&self) -> Result<Vec<CountryRow>, ApiError> {
        let url = self.url(CountryEndpoints::LEGACY_TABLE);
        debug!("Fetching country table from: {}", url);

        let response = self.http.get(&url).send().await?;
        decode(CountryEndpoints::LEGACY_TABLE, response).await
    }

    /// Filter-only search without pagination (legacy revision)
    pub async fn search_unpaged(
        &self,
        filter: &FilterCriteria,
    ) -> Result<Vec<CountryRow>, ApiError> {
        let url = self.url(CountryEndpoints::LEGACY_SEARCH);
        debug!("Searching countries at: {} with {:?}", url, filter);

        let response = self.http.post(&url).json(filter).send().await?;
        decode(CountryEndpoints::LEGACY_SEARCH, response).await
    }

    async fn search_page_paged(
        &self,
        filter: &FilterCriteria,
        page_request: &PageRequest,
    ) -> Result<PageResult<CountryRow>, ApiError> {
        let url = self.url(CountryEndpoints::SEARCH_PAGE);
        let body = CountrySearchRequest {
            filter,
            page_request,
        };
        debug!(
            "Querying countries at: {} page={} size={}",
            url, page_request.page, page_request.size
        );

        let response = self.http.post(&url).json(&body).send().await?;
        decode(CountryEndpoints::SEARCH_PAGE, response).await
    }

    async fn search_page_legacy(
        &self,
        filter: &FilterCriteria,
        page_request: &PageRequest,
    ) -> Result<PageResult<CountryRow>, ApiError> {
        let rows = if filter.is_empty() {
            self.country_table().await?
        } else {
            self.search_unpaged(filter).await?
        };
        Ok(legacy::paginate(rows, page_request))
    }
}

#[async_trait]
impl CountryApi for CountryClient {
    async fn search_page(
        &self,
        filter: &FilterCriteria,
        page_request: &PageRequest,
    ) -> Result<PageResult<CountryRow>, ApiError> {
        let result = match self.revision {
            ApiRevision::Paged => self.search_page_paged(filter, page_request).await,
            ApiRevision::Legacy => self.search_page_legacy(filter, page_request).await,
        };

        if let Ok(page) = &result {
            info!(
                "Loaded page {} ({} of {} countries)",
                page.page,
                page.content.len(),
                page.total_elements
            );
        }
        result
    }

    async fn country_detail(&self, iso3: &str) -> Result<CountryDetail, ApiError> {
        let prefix = match self.revision {
            ApiRevision::Paged => CountryEndpoints::DETAIL,
            ApiRevision::Legacy => CountryEndpoints::LEGACY_DETAIL,
        };
        let url = self.detail_url(prefix, iso3)?;
        debug!("Fetching country detail from: {}", url);

        let response = self.http.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(iso3.to_string()));
        }

        let body: CountryDetailResponse = decode(prefix, response).await?;
        body.country.ok_or_else(|| ApiError::NotFound(iso3.to_string()))
    }
}

/// Turn a response into `T`, mapping non-success statuses and malformed bodies to errors
async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let response_text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&response_text)
            .ok()
            .and_then(|body| body.describe())
            .unwrap_or(response_text);
        warn!("{} returned {}: {}", endpoint, status, message);
        return Err(ApiError::Status {
            status_code: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&response_text).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let err = CountryClient::with_http_client(Client::new(), "::nope", ApiRevision::Paged)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_client_from_config_trims_base_url() {
        let config = Config {
            api_base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        let client = CountryClient::new(&config).unwrap();
        assert_eq!(
            client.url(CountryEndpoints::SEARCH_PAGE),
            "http://localhost:8080/api/countries"
        );
        assert_eq!(client.revision(), ApiRevision::Paged);
    }

    #[test]
    fn test_detail_url_encodes_reserved_characters() {
        let base_url = "http://localhost:8080/";
        let client =
            CountryClient::with_http_client(Client::new(), base_url, ApiRevision::Paged).unwrap();

        let url = client.detail_url(CountryEndpoints::DETAIL, " FRA ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/countries/FRA");

        let url = client.detail_url(CountryEndpoints::DETAIL, "F#A").unwrap();
        assert_eq!(url.path(), "/api/countries/F%23A");
        assert_eq!(url.fragment(), None);

        let url = client.detail_url(CountryEndpoints::LEGACY_DETAIL, "F?A/B").unwrap();
        assert_eq!(url.path(), "/api/country-detail/F%3FA%2FB");
        assert_eq!(url.query(), None);
    }
}
