use serde::{Deserialize, Deserializer, Serialize};

/// Flattened projection of a country for the listing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRow {
    pub id: i64,
    pub name: String,
    pub iso3: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub numeric_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subregion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude_longitude: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emoji: String,
}

impl CountryRow {
    /// Text value of a column, as shown in the table and used for local ordering
    pub fn column_text(&self, field: SortField) -> String {
        match field {
            SortField::Id => self.id.to_string(),
            SortField::Name => self.name.clone(),
            SortField::Iso3 => self.iso3.clone(),
            SortField::NumericCode => self.numeric_code.clone(),
            SortField::CapitalName => self.capital_name.clone(),
            SortField::Currency => self.currency.clone(),
            SortField::Region => self.region.clone(),
            SortField::Subregion => self.subregion.clone(),
            SortField::LatitudeLongitude => self.latitude_longitude.clone(),
            SortField::Emoji => self.emoji.clone(),
        }
    }
}

/// Full record of a single country, fetched by ISO3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetail {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub iso2: String,
    pub iso3: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub numeric_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tld: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subregion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nationality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emoji: String,
    #[serde(default, rename = "emojiU", deserialize_with = "null_as_default")]
    pub emoji_u: String,
}

impl CountryDetail {
    /// Labelled read-only fields in display order
    pub fn field_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ISO3", self.iso3.clone()),
            ("Numeric Code", self.numeric_code.clone()),
            ("Phone Code", self.phone_code.clone()),
            ("Capital", self.capital_name.clone()),
            (
                "Currency",
                format!("{} ({})", self.currency, self.currency_symbol),
            ),
            ("Currency Name", self.currency_name.clone()),
            ("Top Level Domain", self.tld.clone()),
            ("Native Name", self.native_name.clone()),
            ("Region", self.region.clone()),
            ("Subregion", self.subregion.clone()),
            ("Nationality", self.nationality.clone()),
            ("Timezones", self.timezones.clone()),
            ("Latitude", self.latitude.to_string()),
            ("Longitude", self.longitude.to_string()),
            ("Emoji Unicode", self.emoji_u.clone()),
        ]
    }
}

/// User supplied constraints for a listing query. All `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.iso3.is_none()
            && self.region.is_none()
            && self.currency.is_none()
    }
}

/// Sortable columns of the listing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Iso3,
    NumericCode,
    CapitalName,
    Currency,
    Region,
    Subregion,
    LatitudeLongitude,
    Emoji,
}

impl SortField {
    /// Columns in table order
    pub const ALL: [SortField; 10] = [
        SortField::Id,
        SortField::Name,
        SortField::Iso3,
        SortField::NumericCode,
        SortField::CapitalName,
        SortField::Currency,
        SortField::Region,
        SortField::Subregion,
        SortField::LatitudeLongitude,
        SortField::Emoji,
    ];

    /// Name used on the wire
    pub fn as_str(&self) -> &str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Iso3 => "iso3",
            SortField::NumericCode => "numericCode",
            SortField::CapitalName => "capitalName",
            SortField::Currency => "currency",
            SortField::Region => "region",
            SortField::Subregion => "subregion",
            SortField::LatitudeLongitude => "latitudeLongitude",
            SortField::Emoji => "emoji",
        }
    }

    /// Column header label
    pub fn label(&self) -> &str {
        match self {
            SortField::Id => "Id",
            SortField::Name => "Name",
            SortField::Iso3 => "ISO3",
            SortField::NumericCode => "Code",
            SortField::CapitalName => "Capital",
            SortField::Currency => "Currency",
            SortField::Region => "Region",
            SortField::Subregion => "Subregion",
            SortField::LatitudeLongitude => "Lat/Long",
            SortField::Emoji => "Flag",
        }
    }

    pub fn from_wire(name: &str) -> Option<SortField> {
        SortField::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// One entry of the ordered sort list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub ascending: bool,
}

impl SortOrder {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    pub fn flipped(self) -> Self {
        Self {
            field: self.field,
            ascending: !self.ascending,
        }
    }
}

/// Page, size and sort sent along with every listing query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: SortOrder) -> Self {
        Self {
            page,
            size,
            sort: vec![sort],
        }
    }
}

/// One page of results as returned by the directory API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

/// Reads an explicit `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `"250"` or `250` for code-like fields
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null => String::new(),
    })
}
