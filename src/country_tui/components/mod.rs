//! Reusable widgets

pub mod country_table;
pub mod filter_form;
pub mod form_field;

pub use country_table::CountryTable;
pub use filter_form::{FilterForm, FormEvent};
pub use form_field::{FormField, FormFieldType};
