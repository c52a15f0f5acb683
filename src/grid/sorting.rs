//! Sorting engine: sort cycling and the stable column comparator.

use super::column::{Column, find_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered sort descriptor. Only the first key is ever applied.
pub type SortState = Vec<SortKey>;

/// Direction the column is currently sorted in, if it is the active sort.
pub fn active_direction(sorting: &[SortKey], column_id: &str) -> Option<SortDirection> {
    sorting
        .first()
        .filter(|key| key.column_id == column_id)
        .map(|key| key.direction)
}

/// Next sort state after a header toggle on `column_id`.
///
/// Cycles unsorted -> ascending -> descending -> unsorted and replaces any
/// previously active column.
pub fn cycle_sort(sorting: &[SortKey], column_id: &str) -> SortState {
    match active_direction(sorting, column_id) {
        None => vec![SortKey::asc(column_id)],
        Some(SortDirection::Ascending) => vec![SortKey::desc(column_id)],
        Some(SortDirection::Descending) => Vec::new(),
    }
}

/// Stable-sort `order` (indices into `rows`) by the active sort key.
///
/// Unknown or non-sortable columns leave the order untouched.
pub fn sort_indices<R>(order: &mut [usize], rows: &[R], columns: &[Column<R>], sorting: &[SortKey]) {
    let Some(key) = sorting.first() else {
        return;
    };
    let Some(column) = find_column(columns, &key.column_id).filter(|c| c.sortable) else {
        return;
    };

    // Evaluate each accessor once.
    let values: Vec<_> = order.iter().map(|&i| column.value(&rows[i])).collect();
    let mut keyed: Vec<(usize, _)> = order.iter().copied().zip(values).collect();
    keyed.sort_by(|(_, a), (_, b)| match key.direction {
        SortDirection::Ascending => a.natural_cmp(b),
        SortDirection::Descending => b.natural_cmp(a),
    });

    for (slot, (index, _)) in order.iter_mut().zip(keyed) {
        *slot = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row = (&'static str, i64);

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name", |r: &Row| r.0.into()),
            Column::new("score", "Score", |r: &Row| r.1.into()),
            Column::new("fixed", "Fixed", |r: &Row| r.0.into()).sortable(false),
        ]
    }

    #[test]
    fn test_cycle_three_states() {
        let s1 = cycle_sort(&[], "name");
        assert_eq!(s1, vec![SortKey::asc("name")]);
        let s2 = cycle_sort(&s1, "name");
        assert_eq!(s2, vec![SortKey::desc("name")]);
        let s3 = cycle_sort(&s2, "name");
        assert!(s3.is_empty());
    }

    #[test]
    fn test_toggle_other_column_replaces_sort() {
        let sorting = vec![SortKey::desc("name")];
        assert_eq!(cycle_sort(&sorting, "score"), vec![SortKey::asc("score")]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let rows: Vec<Row> = vec![("a", 2), ("b", 1), ("c", 2), ("d", 1)];
        let cols = columns();

        let mut order: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&mut order, &rows, &cols, &[SortKey::asc("score")]);
        assert_eq!(order, vec![1, 3, 0, 2]);

        let mut order: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&mut order, &rows, &cols, &[SortKey::desc("score")]);
        assert_eq!(order, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_only_first_key_applies() {
        let rows: Vec<Row> = vec![("b", 1), ("a", 1)];
        let cols = columns();
        let mut order = vec![0, 1];
        sort_indices(
            &mut order,
            &rows,
            &cols,
            &[SortKey::asc("score"), SortKey::asc("name")],
        );
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let rows: Vec<Row> = vec![("b", 1), ("a", 2)];
        let cols = columns();
        let mut order = vec![0, 1];
        sort_indices(&mut order, &rows, &cols, &[SortKey::asc("fixed")]);
        assert_eq!(order, vec![0, 1]);
        sort_indices(&mut order, &rows, &cols, &[SortKey::asc("missing")]);
        assert_eq!(order, vec![0, 1]);
    }
}
