//! Single-country lookup behind the detail view

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::models::CountryDetail;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Nothing requested yet
    Idle,
    Loading { iso3: String },
    Loaded(Box<CountryDetail>),
    /// Lookup failed or the country does not exist
    NotFound { iso3: String },
}

#[derive(Debug, Clone)]
pub struct DetailController {
    state: DetailState,
    iso3: Option<String>,
    latest_token: u64,
}

impl Default for DetailController {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailController {
    pub fn new() -> Self {
        Self {
            state: DetailState::Idle,
            iso3: None,
            latest_token: 0,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn iso3(&self) -> Option<&str> {
        self.iso3.as_deref()
    }

    /// Start loading `iso3`; returns the token the response must carry
    pub fn open(&mut self, iso3: &str) -> u64 {
        self.latest_token += 1;
        self.iso3 = Some(iso3.to_string());
        self.state = DetailState::Loading {
            iso3: iso3.to_string(),
        };
        self.latest_token
    }

    /// Request the current country again
    pub fn reload(&mut self) -> Option<(u64, String)> {
        let iso3 = self.iso3.clone()?;
        let token = self.open(&iso3);
        Some((token, iso3))
    }

    pub fn apply_response(&mut self, token: u64, result: Result<CountryDetail, ApiError>) -> bool {
        if token != self.latest_token {
            debug!("Discarding stale country detail (token {} < {})", token, self.latest_token);
            return false;
        }

        let iso3 = self.iso3.clone().unwrap_or_default();
        self.state = match result {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(e) => {
                if !e.is_not_found() {
                    warn!("Country detail lookup for {} failed: {}", iso3, e);
                }
                DetailState::NotFound { iso3 }
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(iso3: &str) -> CountryDetail {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Testland",
            "iso3": iso3,
            "latitude": 1.5,
            "longitude": -2.0
        }))
        .unwrap()
    }

    #[test]
    fn test_open_enters_loading() {
        let mut controller = DetailController::new();
        assert_eq!(controller.state(), &DetailState::Idle);

        controller.open("FRA");
        assert_eq!(
            controller.state(),
            &DetailState::Loading {
                iso3: "FRA".to_string()
            }
        );
        assert_eq!(controller.iso3(), Some("FRA"));
    }

    #[test]
    fn test_unknown_code_renders_not_found() {
        let mut controller = DetailController::new();
        let token = controller.open("XXX");
        assert!(controller.apply_response(token, Err(ApiError::NotFound("XXX".to_string()))));
        assert_eq!(
            controller.state(),
            &DetailState::NotFound {
                iso3: "XXX".to_string()
            }
        );
    }

    #[test]
    fn test_transport_failure_is_indistinguishable_from_not_found() {
        let mut controller = DetailController::new();
        let token = controller.open("FRA");
        controller.apply_response(
            token,
            Err(ApiError::Status {
                status_code: 503,
                message: "unavailable".to_string(),
            }),
        );
        assert!(matches!(controller.state(), DetailState::NotFound { .. }));
    }

    #[test]
    fn test_success_loads_detail() {
        let mut controller = DetailController::new();
        let token = controller.open("TST");
        controller.apply_response(token, Ok(detail("TST")));
        match controller.state() {
            DetailState::Loaded(d) => assert_eq!(d.iso3, "TST"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_stale_detail_is_ignored() {
        let mut controller = DetailController::new();
        let first = controller.open("FRA");
        let second = controller.open("DEU");

        assert!(!controller.apply_response(first, Ok(detail("FRA"))));
        assert_eq!(
            controller.state(),
            &DetailState::Loading {
                iso3: "DEU".to_string()
            }
        );

        assert!(controller.apply_response(second, Ok(detail("DEU"))));
        assert!(matches!(controller.state(), DetailState::Loaded(d) if d.iso3 == "DEU"));
    }

    #[test]
    fn test_reload_reissues_current_code() {
        let mut controller = DetailController::new();
        assert!(controller.reload().is_none());

        let first = controller.open("JPN");
        let (token, iso3) = controller.reload().unwrap();
        assert!(token > first);
        assert_eq!(iso3, "JPN");
    }
}
