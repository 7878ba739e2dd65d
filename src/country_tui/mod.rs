//! Country directory terminal user interface
//!
//! Two screens share one event loop: the paginated country list and the
//! single-country detail view. Fetches run on tokio tasks and report back
//! through [`AppEvent`]s.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::{App, Route};
pub use events::AppEvent;
pub use screens::{CountriesScreen, DetailScreen};
