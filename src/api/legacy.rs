//! Migration of the legacy API revision onto the paginated contract
//!
//! The legacy server exposes an unpaginated table and a filter-only search.
//! Both return the full matching set, so ordering and slicing happen here and
//! callers always receive a [`PageResult`].

use std::cmp::Ordering;

use crate::models::{CountryRow, PageRequest, PageResult, SortField, SortOrder};

/// Sort `rows` by the ordered sort list and cut out the requested page
pub fn paginate(mut rows: Vec<CountryRow>, request: &PageRequest) -> PageResult<CountryRow> {
    if !request.sort.is_empty() {
        rows.sort_by(|a, b| compare_rows(a, b, &request.sort));
    }

    let size = request.size.max(1);
    let total_elements = rows.len() as u64;
    let total_pages = total_elements.div_ceil(size as u64) as u32;

    let start = (request.page as usize).saturating_mul(size as usize);
    let content = rows.into_iter().skip(start).take(size as usize).collect();

    PageResult {
        content,
        page: request.page,
        size,
        total_elements,
        total_pages,
    }
}

fn compare_rows(a: &CountryRow, b: &CountryRow, sort: &[SortOrder]) -> Ordering {
    for order in sort {
        let ordering = compare_field(a, b, order.field);
        let ordering = if order.ascending { ordering } else { ordering.reverse() };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_field(a: &CountryRow, b: &CountryRow, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::NumericCode => match (
            a.numeric_code.parse::<i64>(),
            b.numeric_code.parse::<i64>(),
        ) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.numeric_code.cmp(&b.numeric_code),
        },
        other => a.column_text(other).cmp(&b.column_text(other)),
    }
}
