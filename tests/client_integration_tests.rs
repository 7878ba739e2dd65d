use country_explorer::api::{ApiError, CountryApi, CountryClient};
use country_explorer::config::ApiRevision;
use country_explorer::models::{FilterCriteria, PageRequest, SortField, SortOrder};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client(server: &MockServer, revision: ApiRevision) -> CountryClient {
    CountryClient::with_http_client(reqwest::Client::new(), &server.uri(), revision).unwrap()
}

fn row(id: i64, name: &str, iso3: &str, region: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "iso3": iso3,
        "numericCode": id,
        "capitalName": "",
        "currency": "EUR",
        "region": region,
        "subregion": "",
        "latitudeLongitude": "",
        "emoji": ""
    })
}

fn by_name() -> PageRequest {
    PageRequest::new(0, 10, SortOrder::ascending(SortField::Name))
}

// ============================================================================
// Paginated search
// ============================================================================

#[tokio::test]
async fn test_search_sends_flat_filter_with_nested_page_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/countries"))
        .and(body_json(json!({
            "region": "Europe",
            "pageRequest": {
                "page": 0,
                "size": 10,
                "sort": [{ "field": "name", "ascending": true }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [row(75, "France", "FRA", "Europe"), row(276, "Germany", "DEU", "Europe")],
            "page": 0,
            "size": 10,
            "totalElements": 2,
            "totalPages": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = FilterCriteria {
        region: Some("Europe".to_string()),
        ..Default::default()
    };
    let page = client(&mock_server, ApiRevision::Paged)
        .search_page(&filter, &by_name())
        .await
        .unwrap();

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.content[0].iso3, "FRA");
    // Numeric codes arrive as numbers and are kept as text
    assert_eq!(page.content[1].numeric_code, "276");
}

#[tokio::test]
async fn test_search_server_error_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/countries"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": 500,
            "error": "Internal Server Error",
            "message": "database unavailable"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, ApiRevision::Paged)
        .search_page(&FilterCriteria::default(), &by_name())
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status_code, message } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_malformed_body_maps_to_decode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"content\": 42}"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, ApiRevision::Paged)
        .search_page(&FilterCriteria::default(), &by_name())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode { ref endpoint, .. } if endpoint == "/api/countries"));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_http() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client =
        CountryClient::with_http_client(reqwest::Client::new(), &uri, ApiRevision::Paged)
            .unwrap();
    let err = client
        .search_page(&FilterCriteria::default(), &by_name())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}

// ============================================================================
// Detail lookup
// ============================================================================

#[tokio::test]
async fn test_detail_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/countries/PER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "country": {
                "id": 173,
                "name": "Peru",
                "iso2": "PE",
                "iso3": "PER",
                "numericCode": "604",
                "phoneCode": "51",
                "capitalName": "Lima",
                "currency": "PEN",
                "currencyName": "Peruvian sol",
                "currencySymbol": "S/.",
                "tld": ".pe",
                "nativeName": "Perú",
                "region": "Americas",
                "subregion": "South America",
                "nationality": "Peruvian",
                "timezones": "America/Lima",
                "latitude": -10.0,
                "longitude": -76.0,
                "emoji": "🇵🇪",
                "emojiU": "U+1F1F5 U+1F1EA"
            }
        })))
        .mount(&mock_server)
        .await;

    let detail = client(&mock_server, ApiRevision::Paged)
        .country_detail("PER")
        .await
        .unwrap();
    assert_eq!(detail.name, "Peru");
    assert_eq!(detail.capital_name, "Lima");
    assert_eq!(detail.emoji_u, "U+1F1F5 U+1F1EA");
}

#[tokio::test]
async fn test_detail_missing_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/countries/XXX"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/countries/YYY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "country": null })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, ApiRevision::Paged);
    assert!(client.country_detail("XXX").await.unwrap_err().is_not_found());
    assert!(client.country_detail("YYY").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_detail_code_is_sent_as_one_path_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/countries/F%3FA"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, ApiRevision::Paged)
        .country_detail("F?A")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Legacy revision
// ============================================================================

#[tokio::test]
async fn test_legacy_table_is_sorted_and_paged_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/country-table"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            row(3, "Chile", "CHL", "Americas"),
            row(1, "Albania", "ALB", "Europe"),
            row(2, "Brazil", "BRA", "Americas"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = PageRequest::new(1, 2, SortOrder::ascending(SortField::Name));
    let page = client(&mock_server, ApiRevision::Legacy)
        .search_page(&FilterCriteria::default(), &request)
        .await
        .unwrap();

    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 1);
    let names: Vec<&str> = page.content.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Chile"]);
}

#[tokio::test]
async fn test_legacy_filtered_search_posts_bare_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/countries/search"))
        .and(body_json(json!({ "region": "Americas" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            row(3, "Chile", "CHL", "Americas"),
            row(2, "Brazil", "BRA", "Americas"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = FilterCriteria {
        region: Some("Americas".to_string()),
        ..Default::default()
    };
    let request = PageRequest::new(0, 10, SortOrder::ascending(SortField::Id).flipped());
    let page = client(&mock_server, ApiRevision::Legacy)
        .search_page(&filter, &request)
        .await
        .unwrap();

    let ids: Vec<i64> = page.content.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_legacy_detail_uses_legacy_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/country-detail/FRA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "country": { "id": 75, "name": "France", "iso3": "FRA" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let detail = client(&mock_server, ApiRevision::Legacy)
        .country_detail("FRA")
        .await
        .unwrap();
    assert_eq!(detail.iso3, "FRA");
}
