//! Filtering engine: global search and per-column predicates.

use super::column::{Column, FilterMatch, find_column};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column_id: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn new(column_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            value: value.into(),
        }
    }
}

pub type ColumnFilters = Vec<ColumnFilter>;

/// Filters after setting `column_id` to `value`.
///
/// An empty value removes the column's entry. Other entries keep their order.
pub fn with_column_filter(filters: &[ColumnFilter], column_id: &str, value: &str) -> ColumnFilters {
    let mut next: ColumnFilters = filters
        .iter()
        .filter(|f| f.column_id != column_id)
        .cloned()
        .collect();
    if !value.is_empty() {
        match filters.iter().position(|f| f.column_id == column_id) {
            Some(pos) => next.insert(pos, ColumnFilter::new(column_id, value)),
            None => next.push(ColumnFilter::new(column_id, value)),
        }
    }
    next
}

/// Current filter value for a column, if any.
pub fn column_filter_value<'a>(filters: &'a [ColumnFilter], column_id: &str) -> Option<&'a str> {
    filters
        .iter()
        .find(|f| f.column_id == column_id)
        .map(|f| f.value.as_str())
}

/// True if any column's value contains `needle`, ignoring case.
pub fn matches_global<R>(row: &R, columns: &[Column<R>], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    columns
        .iter()
        .any(|column| column.value(row).to_string().to_lowercase().contains(&needle))
}

/// True if every column filter accepts the row.
///
/// A filter naming an unknown column matches nothing. Filters on columns
/// marked not filterable are skipped.
pub fn matches_column_filters<R>(row: &R, columns: &[Column<R>], filters: &[ColumnFilter]) -> bool {
    filters.iter().all(|filter| {
        if filter.value.is_empty() {
            return true;
        }
        let Some(column) = find_column(columns, &filter.column_id) else {
            return false;
        };
        if !column.filterable {
            return true;
        }
        let cell = column.value(row).to_string();
        match column.filter_match {
            FilterMatch::Exact => cell == filter.value,
            FilterMatch::Contains => cell.to_lowercase().contains(&filter.value.to_lowercase()),
        }
    })
}
