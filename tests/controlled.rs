use std::cell::RefCell;
use std::rc::Rc;

use habitgrid::grid::{
    Column, ColumnFilter, ColumnFilters, DataGrid, PaginationState, RowSelection, SortKey,
    SortState,
};

#[derive(Debug, Clone)]
struct Review {
    id: u32,
    author: &'static str,
    rating: i64,
}

fn columns() -> Vec<Column<Review>> {
    vec![
        Column::new("author", "Author", |r: &Review| r.author.into()),
        Column::new("rating", "Rating", |r: &Review| r.rating.into()),
    ]
}

fn reviews() -> Vec<Review> {
    vec![
        Review { id: 1, author: "dana", rating: 4 },
        Review { id: 2, author: "eli", rating: 2 },
        Review { id: 3, author: "fay", rating: 5 },
        Review { id: 4, author: "gus", rating: 3 },
    ]
}

fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
}

fn authors(grid: &DataGrid<Review>) -> Vec<&'static str> {
    grid.visible_rows().map(|(_, r)| r.author).collect()
}

#[test]
fn test_controlled_sorting_emits_without_applying() {
    let (seen, on_change) = recorder::<SortState>();
    let mut grid = DataGrid::builder(columns())
        .rows(reviews())
        .controlled_sorting(Vec::new(), on_change)
        .build()
        .unwrap();

    grid.toggle_sort("rating");
    assert_eq!(*seen.borrow(), vec![vec![SortKey::asc("rating")]]);
    // Value is owned by the caller until pushed back.
    assert!(grid.sorting().is_empty());
    assert_eq!(authors(&grid), vec!["dana", "eli", "fay", "gus"]);

    grid.sync_sorting(vec![SortKey::asc("rating")]);
    assert_eq!(authors(&grid), vec!["eli", "gus", "dana", "fay"]);

    grid.toggle_sort("rating");
    assert_eq!(seen.borrow().last(), Some(&vec![SortKey::desc("rating")]));
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_noop_actions_emit_nothing() {
    let (seen, on_change) = recorder::<PaginationState>();
    let mut grid = DataGrid::builder(columns())
        .rows(reviews())
        .controlled_pagination(PaginationState::with_size(2), on_change)
        .build()
        .unwrap();

    assert!(!grid.previous_page());
    assert!(seen.borrow().is_empty());

    assert!(grid.next_page());
    assert_eq!(
        *seen.borrow(),
        vec![PaginationState {
            page_index: 1,
            page_size: 2
        }]
    );
}

#[test]
fn test_mixed_controlled_and_internal_categories() {
    let (filter_seen, on_filter) = recorder::<ColumnFilters>();
    let (page_seen, on_page) = recorder::<PaginationState>();
    let mut grid = DataGrid::builder(columns())
        .rows(reviews())
        .controlled_column_filters(Vec::new(), on_filter)
        .controlled_pagination(
            PaginationState {
                page_index: 1,
                page_size: 2,
            },
            on_page,
        )
        .build()
        .unwrap();

    // Sorting stays grid-owned and applies immediately.
    grid.toggle_sort("author");
    assert_eq!(grid.sorting(), &vec![SortKey::asc("author")]);

    // A new filter reports the filter and the implied first-page reset.
    grid.set_column_filter("author", "a");
    assert_eq!(*filter_seen.borrow(), vec![vec![ColumnFilter::new("author", "a")]]);
    assert_eq!(*page_seen.borrow(), vec![PaginationState::with_size(2)]);
    assert!(grid.column_filters().is_empty());
    assert_eq!(grid.pagination().page_index, 1);

    grid.sync_column_filters(vec![ColumnFilter::new("author", "a")]);
    grid.sync_pagination(PaginationState::with_size(2));
    assert_eq!(authors(&grid), vec!["dana", "fay"]);
}

#[test]
fn test_controlled_selection_and_global_filter() {
    let (selection_seen, on_selection) = recorder::<RowSelection>();
    let (filter_seen, on_filter) = recorder::<String>();
    let mut grid = DataGrid::builder(columns())
        .rows(reviews())
        .row_id(|r: &Review| format!("review-{}", r.id))
        .enable_row_selection()
        .controlled_selection(RowSelection::from_ids(["review-9"]), on_selection)
        .controlled_global_filter("", on_filter)
        .build()
        .unwrap();

    grid.toggle_row("review-2");
    assert_eq!(
        *selection_seen.borrow(),
        vec![RowSelection::from_ids(["review-9", "review-2"])]
    );
    assert!(!grid.is_row_selected("review-2"));

    grid.sync_selection(RowSelection::from_ids(["review-9", "review-2"]));
    assert!(grid.is_row_selected("review-2"));
    // Ids for rows that do not exist are kept and ignored.
    assert!(grid.is_row_selected("review-9"));

    grid.set_global_filter("fay");
    assert_eq!(*filter_seen.borrow(), vec!["fay".to_string()]);
    assert_eq!(authors(&grid).len(), 4);

    grid.sync_global_filter("fay");
    assert_eq!(authors(&grid), vec!["fay"]);
    // Same text as the synced value: nothing to report.
    grid.set_global_filter("fay");
    assert_eq!(filter_seen.borrow().len(), 1);
}
