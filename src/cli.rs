use clap::{Parser, Subcommand};

use crate::controller::Route;
use crate::country_tui::components::country_table::{CountryTable, COLUMN_WIDTHS};
use crate::country_tui::ui::fit_width;
use crate::models::{
    CountryDetail, CountryRow, FilterCriteria, PageRequest, PageResult, SortField, SortOrder,
};

#[derive(Parser, Debug)]
#[command(name = "country-explorer")]
#[command(about = "Browse a country directory service from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run in CLI mode (print output and exit, no interactive TUI)
    #[arg(long, global = true)]
    pub cli: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List one page of countries
    #[command(alias = "ls")]
    List {
        /// Country name
        #[arg(long)]
        name: Option<String>,

        /// ISO 3166-1 alpha-3 code
        #[arg(long)]
        iso3: Option<String>,

        /// Region, e.g. Europe
        #[arg(long)]
        region: Option<String>,

        /// Currency code, e.g. EUR
        #[arg(long)]
        currency: Option<String>,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Rows per page (defaults to COUNTRY_PAGE_SIZE)
        #[arg(long)]
        size: Option<u32>,

        /// Column to sort by (id, name, iso3, numericCode, capitalName, currency, region,
        /// subregion, latitudeLongitude, emoji)
        #[arg(long, default_value = "name", value_parser = parse_sort_field)]
        sort: SortField,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show one country by ISO3 code
    Show {
        /// ISO 3166-1 alpha-3 code
        iso3: String,
    },
}

/// Accepts wire names (`capitalName`) and header labels (`capital`), case-insensitively
pub fn parse_sort_field(s: &str) -> Result<SortField, String> {
    let wanted = s.trim().to_lowercase();
    SortField::ALL
        .into_iter()
        .find(|field| {
            field.as_str().to_lowercase() == wanted || field.label().to_lowercase() == wanted
        })
        .ok_or_else(|| format!("unknown sort column '{}'", s))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Commands {
    /// Filter criteria given on the command line
    pub fn filter(&self) -> FilterCriteria {
        match self {
            Commands::List {
                name,
                iso3,
                region,
                currency,
                ..
            } => FilterCriteria {
                name: non_empty(name),
                iso3: non_empty(iso3),
                region: non_empty(region),
                currency: non_empty(currency),
            },
            Commands::Show { .. } => FilterCriteria::default(),
        }
    }

    /// Paging for `list`; `None` for `show`
    pub fn page_request(&self, default_size: u32) -> Option<PageRequest> {
        match self {
            Commands::List {
                page, size, sort, desc, ..
            } => {
                let order = SortOrder::ascending(*sort);
                let order = if *desc { order.flipped() } else { order };
                Some(PageRequest::new(*page, size.unwrap_or(default_size).max(1), order))
            }
            Commands::Show { .. } => None,
        }
    }

    /// Location the TUI opens at
    pub fn route(&self) -> Route {
        match self {
            Commands::List { .. } => Route::Countries,
            Commands::Show { iso3 } => Route::Country {
                iso3: iso3.trim().to_uppercase(),
            },
        }
    }
}

/// Plain-text rendering of one listing page
pub fn format_page(page: &PageResult<CountryRow>) -> String {
    if page.content.is_empty() {
        return "No countries found".to_string();
    }

    let header = SortField::ALL
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(field, width)| fit_width(field.label(), width))
        .collect::<Vec<_>>()
        .join("│");
    let rule = "─".repeat(COLUMN_WIDTHS.iter().sum::<usize>() + COLUMN_WIDTHS.len() - 1);

    let mut lines = vec![header, rule];
    lines.extend(page.content.iter().map(CountryTable::row_line));
    lines.push(String::new());
    lines.push(format!(
        "Page {} of {} ({} countries)",
        page.page.saturating_add(1),
        page.total_pages.max(1),
        page.total_elements
    ));
    lines.join("\n")
}

/// Plain-text rendering of a single country
pub fn format_detail(detail: &CountryDetail) -> String {
    let mut lines = vec![format!("{} {}", detail.emoji, detail.name).trim().to_string()];
    lines.extend(
        detail
            .field_rows()
            .into_iter()
            .map(|(label, value)| format!("  {:<18}{}", label, value)),
    );
    lines.join("\n")
}
