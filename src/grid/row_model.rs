//! Row model builder: filter, then sort, then paginate.

use super::column::Column;
use super::filtering::{ColumnFilter, matches_column_filters, matches_global};
use super::pagination::{PageMode, PaginationState, page_count, page_window};
use super::selection::RowId;
use super::sorting::{SortKey, sort_indices};

/// How rows are identified.
pub enum RowIdentity<R> {
    /// Index of the row in the supplied row array.
    Positional,
    Extractor(Box<dyn Fn(&R) -> RowId>),
}

impl<R> RowIdentity<R> {
    pub fn extractor(f: impl Fn(&R) -> RowId + 'static) -> Self {
        RowIdentity::Extractor(Box::new(f))
    }

    pub fn id_of(&self, index: usize, row: &R) -> RowId {
        match self {
            RowIdentity::Positional => index.to_string(),
            RowIdentity::Extractor(f) => f(row),
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, RowIdentity::Positional)
    }
}

/// A row eligible for display on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Index into the grid's row array.
    pub index: usize,
    pub id: RowId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowModel {
    pub visible: Vec<VisibleRow>,
    /// Rows left after filtering, before pagination.
    pub total_filtered: usize,
    pub page_count: usize,
}

impl RowModel {
    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.visible.iter().map(|row| &row.id)
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Borrowed inputs for [`build_row_model`].
pub struct RowModelInput<'a, R> {
    pub rows: &'a [R],
    pub columns: &'a [Column<R>],
    pub row_id: &'a RowIdentity<R>,
    pub sorting: &'a [SortKey],
    pub column_filters: &'a [ColumnFilter],
    pub global_filter: &'a str,
    pub pagination: &'a PaginationState,
    pub mode: PageMode,
}

/// Build the visible row sequence. Pure: equal inputs give equal output.
pub fn build_row_model<R>(input: &RowModelInput<'_, R>) -> RowModel {
    let mut order: Vec<usize> = input
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            matches_column_filters(*row, input.columns, input.column_filters)
                && matches_global(*row, input.columns, input.global_filter)
        })
        .map(|(index, _)| index)
        .collect();

    sort_indices(&mut order, input.rows, input.columns, input.sorting);

    let total_filtered = order.len();
    let page_count = page_count(input.mode, total_filtered, input.pagination.page_size);

    let page: &[usize] = match input.mode {
        PageMode::Client => {
            let (start, end) = page_window(input.pagination, total_filtered);
            &order[start..end]
        }
        PageMode::Server { .. } => &order[..],
    };

    let visible = page
        .iter()
        .map(|&index| VisibleRow {
            index,
            id: input.row_id.id_of(index, &input.rows[index]),
        })
        .collect();

    RowModel {
        visible,
        total_filtered,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        rank: i64,
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("name", "Name", |i: &Item| i.name.into()),
            Column::new("rank", "Rank", |i: &Item| i.rank.into()),
        ]
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Bob", rank: 3 },
            Item { name: "Charlie", rank: 1 },
            Item { name: "Alice", rank: 2 },
        ]
    }

    #[test]
    fn test_filter_then_sort_then_paginate() {
        let rows = items();
        let cols = columns();
        let id = RowIdentity::extractor(|i: &Item| i.name.to_lowercase());
        let sorting = vec![SortKey::asc("rank")];
        let pagination = PaginationState::with_size(2);

        let model = build_row_model(&RowModelInput {
            rows: &rows,
            columns: &cols,
            row_id: &id,
            sorting: &sorting,
            column_filters: &[],
            global_filter: "",
            pagination: &pagination,
            mode: PageMode::Client,
        });

        let ids: Vec<_> = model.ids().cloned().collect();
        assert_eq!(ids, vec!["charlie", "alice"]);
        assert_eq!(model.total_filtered, 3);
        assert_eq!(model.page_count, 2);
    }

    #[test]
    fn test_positional_identity_uses_source_index() {
        let rows = items();
        let cols = columns();
        let id = RowIdentity::Positional;
        let sorting = vec![SortKey::asc("name")];
        let pagination = PaginationState::default();

        let model = build_row_model(&RowModelInput {
            rows: &rows,
            columns: &cols,
            row_id: &id,
            sorting: &sorting,
            column_filters: &[],
            global_filter: "",
            pagination: &pagination,
            mode: PageMode::Client,
        });

        let ids: Vec<_> = model.ids().cloned().collect();
        assert_eq!(ids, vec!["2", "0", "1"]);
    }

    #[test]
    fn test_server_mode_does_not_slice() {
        let rows = items();
        let cols = columns();
        let id = RowIdentity::Positional;
        let pagination = PaginationState {
            page_index: 4,
            page_size: 1,
        };

        let model = build_row_model(&RowModelInput {
            rows: &rows,
            columns: &cols,
            row_id: &id,
            sorting: &[],
            column_filters: &[],
            global_filter: "",
            pagination: &pagination,
            mode: PageMode::Server { page_count: 9 },
        });

        assert_eq!(model.visible.len(), 3);
        assert_eq!(model.page_count, 9);
    }
}
