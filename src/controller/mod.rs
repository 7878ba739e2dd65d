//! View controllers
//!
//! Controllers own the state behind each screen and decide which queries to
//! send. They never perform I/O themselves: every state change that needs
//! data returns a ticket, the caller runs the query, and the result comes
//! back through `apply_response` together with the ticket's token.
//!
//! ```text
//!   key press ──► controller op ──► QueryTicket ──► spawned fetch
//!                      ▲                                 │
//!                      └──── apply_response(token) ◄─────┘
//! ```
//!
//! Tokens increase monotonically per controller; a response whose token is
//! no longer the latest one issued is dropped.

pub mod detail;
pub mod table;

pub use detail::{DetailController, DetailState};
pub use table::{QueryTicket, ResponseOutcome, TableController};

/// Navigable locations of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/countries`
    Countries,
    /// `/countries/{iso3}`
    Country { iso3: String },
}

impl Route {
    pub const COUNTRIES_PATH: &'static str = "/countries";

    /// Parse a location path; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() || trimmed == Self::COUNTRIES_PATH {
            return Some(Route::Countries);
        }

        let iso3 = trimmed.strip_prefix(Self::COUNTRIES_PATH)?.strip_prefix('/')?;
        if iso3.is_empty() || iso3.contains('/') {
            return None;
        }
        Some(Route::Country {
            iso3: iso3.to_string(),
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Countries => Self::COUNTRIES_PATH.to_string(),
            Route::Country { iso3 } => format!("{}/{}", Self::COUNTRIES_PATH, iso3),
        }
    }
}
