//! Adapter from the country-table wire shape to the view shape

use serde::{Deserialize, Serialize};

/// Country entry as served by the country-table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTableDto {
    pub iso2: String,
    pub name: String,
    pub language: String,
}

/// Country entry as consumed by views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTableEntry {
    pub code: String,
    pub label: String,
    pub locale: String,
}

impl From<&CountryTableDto> for CountryTableEntry {
    fn from(dto: &CountryTableDto) -> Self {
        Self {
            code: dto.iso2.clone(),
            label: dto.name.clone(),
            locale: dto.language.clone(),
        }
    }
}

/// Rename fields one-to-one, keeping input order
pub fn to_country_table_entries(dtos: &[CountryTableDto]) -> Vec<CountryTableEntry> {
    dtos.iter().map(CountryTableEntry::from).collect()
}
