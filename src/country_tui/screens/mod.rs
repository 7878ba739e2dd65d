//! Screens of the country TUI

pub mod countries;
pub mod detail;

pub use countries::{CountriesAction, CountriesScreen, Focus};
pub use detail::{DetailAction, DetailScreen};
