//! Generic data grid.
//!
//! A [`DataGrid`] turns a row array and a set of [`Column`] descriptors into a
//! sorted, filtered, paginated and selectable row model. The model is rebuilt
//! after every state change and drawn by [`render`] as either a table or a
//! card list, both projected from the same rows.
//!
//! State categories (sorting, column filters, global filter, pagination,
//! selection) are each resolved once at build time to a [`StateSlot`]: either
//! owned by the grid or controlled by the caller through a change callback.

pub mod column;
pub mod controlled;
pub mod filtering;
pub mod pagination;
pub mod render;
pub mod row_model;
pub mod selection;
pub mod sorting;

use log::{debug, trace, warn};
use ratatui::text::Text;
use thiserror::Error;

pub use column::{CellValue, Column, ColumnWidth, FilterMatch};
pub use controlled::StateSlot;
pub use filtering::{ColumnFilter, ColumnFilters};
pub use pagination::{PageMode, PaginationState};
pub use render::{DualView, Presentation, render_grid};
pub use row_model::{RowIdentity, RowModel, VisibleRow};
pub use selection::{CheckState, RowId, RowSelection};
pub use sorting::{SortDirection, SortKey, SortState};

use row_model::{RowModelInput, build_row_model};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No results.";

type CardRenderer<R> = Box<dyn Fn(&R) -> Text<'static>>;
type RowClickHandler<R> = Box<dyn FnMut(&R)>;

/// Misconfiguration detected while building a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("row selection requires a row id extractor; positional ids drift when rows are filtered or sorted")]
    SelectionRequiresRowId,
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Builder for [`DataGrid`].
pub struct GridBuilder<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    row_id: Option<RowIdentity<R>>,
    sorting: StateSlot<SortState>,
    column_filters: StateSlot<ColumnFilters>,
    global_filter: StateSlot<String>,
    pagination: StateSlot<PaginationState>,
    selection: StateSlot<RowSelection>,
    page_count: Option<usize>,
    selection_enabled: bool,
    card: Option<CardRenderer<R>>,
    on_row_click: Option<RowClickHandler<R>>,
    empty_message: String,
    card_breakpoint: u16,
}

impl<R> GridBuilder<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            row_id: None,
            sorting: StateSlot::default(),
            column_filters: StateSlot::default(),
            global_filter: StateSlot::default(),
            pagination: StateSlot::default(),
            selection: StateSlot::default(),
            page_count: None,
            selection_enabled: false,
            card: None,
            on_row_click: None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            card_breakpoint: render::DEFAULT_CARD_BREAKPOINT,
        }
    }

    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    pub fn row_id(mut self, f: impl Fn(&R) -> RowId + 'static) -> Self {
        self.row_id = Some(RowIdentity::extractor(f));
        self
    }

    pub fn initial_sorting(mut self, sorting: SortState) -> Self {
        self.sorting = StateSlot::uncontrolled(sorting);
        self
    }

    pub fn controlled_sorting(
        mut self,
        sorting: SortState,
        on_change: impl FnMut(&SortState) + 'static,
    ) -> Self {
        self.sorting = StateSlot::controlled(sorting, on_change);
        self
    }

    pub fn initial_column_filters(mut self, filters: ColumnFilters) -> Self {
        self.column_filters = StateSlot::uncontrolled(filters);
        self
    }

    pub fn controlled_column_filters(
        mut self,
        filters: ColumnFilters,
        on_change: impl FnMut(&ColumnFilters) + 'static,
    ) -> Self {
        self.column_filters = StateSlot::controlled(filters, on_change);
        self
    }

    pub fn initial_global_filter(mut self, filter: impl Into<String>) -> Self {
        self.global_filter = StateSlot::uncontrolled(filter.into());
        self
    }

    pub fn controlled_global_filter(
        mut self,
        filter: impl Into<String>,
        on_change: impl FnMut(&String) + 'static,
    ) -> Self {
        self.global_filter = StateSlot::controlled(filter.into(), on_change);
        self
    }

    pub fn initial_pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = StateSlot::uncontrolled(pagination);
        self
    }

    pub fn controlled_pagination(
        mut self,
        pagination: PaginationState,
        on_change: impl FnMut(&PaginationState) + 'static,
    ) -> Self {
        self.pagination = StateSlot::controlled(pagination, on_change);
        self
    }

    pub fn initial_selection(mut self, selection: RowSelection) -> Self {
        self.selection = StateSlot::uncontrolled(selection);
        self
    }

    pub fn controlled_selection(
        mut self,
        selection: RowSelection,
        on_change: impl FnMut(&RowSelection) + 'static,
    ) -> Self {
        self.selection = StateSlot::controlled(selection, on_change);
        self
    }

    /// Rows are already sliced by the data source; use its page count.
    pub fn page_count(mut self, page_count: usize) -> Self {
        self.page_count = Some(page_count);
        self
    }

    pub fn enable_row_selection(mut self) -> Self {
        self.selection_enabled = true;
        self
    }

    /// Enables the card presentation below the width breakpoint.
    pub fn render_card(mut self, f: impl Fn(&R) -> Text<'static> + 'static) -> Self {
        self.card = Some(Box::new(f));
        self
    }

    pub fn on_row_click(mut self, f: impl FnMut(&R) + 'static) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn card_breakpoint(mut self, width: u16) -> Self {
        self.card_breakpoint = width;
        self
    }

    pub fn build(self) -> Result<DataGrid<R>, GridError> {
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.id == column.id) {
                return Err(GridError::DuplicateColumn(column.id.clone()));
            }
        }
        if self.selection_enabled && self.row_id.is_none() {
            return Err(GridError::SelectionRequiresRowId);
        }
        if self.pagination.get().page_size == 0 {
            return Err(GridError::ZeroPageSize);
        }

        let mode = match self.page_count {
            Some(page_count) => PageMode::Server { page_count },
            None => PageMode::Client,
        };

        let mut grid = DataGrid {
            rows: self.rows,
            columns: self.columns,
            row_id: self.row_id.unwrap_or(RowIdentity::Positional),
            sorting: self.sorting,
            column_filters: self.column_filters,
            global_filter: self.global_filter,
            pagination: self.pagination,
            selection: self.selection,
            mode,
            selection_enabled: self.selection_enabled,
            card: self.card,
            on_row_click: self.on_row_click,
            empty_message: self.empty_message,
            card_breakpoint: self.card_breakpoint,
            model: RowModel::default(),
        };
        grid.refresh();
        debug!(
            "Grid built: {} columns, {} rows, mode {:?}",
            grid.columns.len(),
            grid.rows.len(),
            grid.mode
        );
        Ok(grid)
    }
}

/// A grid instance over rows of type `R`.
pub struct DataGrid<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    row_id: RowIdentity<R>,
    sorting: StateSlot<SortState>,
    column_filters: StateSlot<ColumnFilters>,
    global_filter: StateSlot<String>,
    pagination: StateSlot<PaginationState>,
    selection: StateSlot<RowSelection>,
    mode: PageMode,
    selection_enabled: bool,
    card: Option<CardRenderer<R>>,
    on_row_click: Option<RowClickHandler<R>>,
    empty_message: String,
    card_breakpoint: u16,
    model: RowModel,
}

impl<R> DataGrid<R> {
    pub fn builder(columns: Vec<Column<R>>) -> GridBuilder<R> {
        GridBuilder::new(columns)
    }

    fn refresh(&mut self) {
        self.model = build_row_model(&RowModelInput {
            rows: &self.rows,
            columns: &self.columns,
            row_id: &self.row_id,
            sorting: self.sorting.get(),
            column_filters: self.column_filters.get(),
            global_filter: self.global_filter.get(),
            pagination: self.pagination.get(),
            mode: self.mode,
        });
        trace!(
            "Row model rebuilt: {} visible, {} filtered, {} pages",
            self.model.visible.len(),
            self.model.total_filtered,
            self.model.page_count
        );
    }

    // ============ Data ============

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Replace the row data, e.g. after the data source refetched.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.refresh();
    }

    /// Update the data source's page count. Only meaningful in server mode.
    pub fn set_page_count(&mut self, page_count: usize) {
        if let PageMode::Server { .. } = self.mode {
            self.mode = PageMode::Server { page_count };
            self.refresh();
        } else {
            warn!("set_page_count({}) ignored: grid paginates client-side", page_count);
        }
    }

    pub fn model(&self) -> &RowModel {
        &self.model
    }

    /// Rows on the current page, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = (&VisibleRow, &R)> {
        self.model
            .visible
            .iter()
            .map(|visible| (visible, &self.rows[visible.index]))
    }

    pub fn visible_row(&self, position: usize) -> Option<(&VisibleRow, &R)> {
        self.model
            .visible
            .get(position)
            .map(|visible| (visible, &self.rows[visible.index]))
    }

    /// Look a row up by identity across all rows, visible or not.
    pub fn row_by_id(&self, id: &str) -> Option<&R> {
        if let Some(visible) = self.model.visible.iter().find(|v| v.id == id) {
            return Some(&self.rows[visible.index]);
        }
        self.rows
            .iter()
            .enumerate()
            .find(|(index, row)| self.row_id.id_of(*index, row) == id)
            .map(|(_, row)| row)
    }

    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    pub fn card_breakpoint(&self) -> u16 {
        self.card_breakpoint
    }

    pub fn has_card_renderer(&self) -> bool {
        self.card.is_some()
    }

    pub fn render_card(&self, row: &R) -> Option<Text<'static>> {
        self.card.as_ref().map(|f| f(row))
    }

    // ============ Sorting ============

    pub fn sorting(&self) -> &SortState {
        self.sorting.get()
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        sorting::active_direction(self.sorting.get(), column_id)
    }

    /// Advance the sort cycle for a column. Returns false if the column is
    /// unknown or not sortable.
    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        let sortable = column::find_column(&self.columns, column_id).is_some_and(|c| c.sortable);
        if !sortable {
            trace!("toggle_sort({}) ignored: not sortable", column_id);
            return false;
        }
        let next = sorting::cycle_sort(self.sorting.get(), column_id);
        debug!("Sorting -> {:?}", next);
        self.sorting.update(next);
        self.refresh();
        true
    }

    // ============ Filtering ============

    pub fn global_filter(&self) -> &str {
        self.global_filter.get()
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        self.column_filters.get()
    }

    pub fn column_filter(&self, column_id: &str) -> Option<&str> {
        filtering::column_filter_value(self.column_filters.get(), column_id)
    }

    pub fn set_global_filter(&mut self, text: &str) {
        if self.global_filter.get() == text {
            return;
        }
        debug!("Global filter -> {:?}", text);
        self.global_filter.update(text.to_string());
        self.reset_page_index();
        self.refresh();
    }

    /// Set or clear (empty `value`) the filter for one column.
    ///
    /// Known columns with `filterable: false` are left alone. Unknown ids are
    /// accepted and match no rows.
    pub fn set_column_filter(&mut self, column_id: &str, value: &str) {
        if column::find_column(&self.columns, column_id).is_some_and(|c| !c.filterable) {
            trace!("set_column_filter({}) ignored: not filterable", column_id);
            return;
        }
        let next = filtering::with_column_filter(self.column_filters.get(), column_id, value);
        if &next == self.column_filters.get() {
            return;
        }
        debug!("Column filters -> {:?}", next);
        self.column_filters.update(next);
        self.reset_page_index();
        self.refresh();
    }

    // ============ Pagination ============

    pub fn pagination(&self) -> PaginationState {
        *self.pagination.get()
    }

    pub fn page_mode(&self) -> PageMode {
        self.mode
    }

    pub fn page_count(&self) -> usize {
        self.model.page_count
    }

    pub fn can_previous_page(&self) -> bool {
        pagination::can_previous(self.pagination.get())
    }

    pub fn can_next_page(&self) -> bool {
        pagination::can_next(self.pagination.get(), self.model.page_count)
    }

    /// Jump to a page. Requests past the last page are ignored.
    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let current = *self.pagination.get();
        if page_index == current.page_index {
            return false;
        }
        if page_index >= self.model.page_count {
            trace!(
                "set_page_index({}) ignored: {} pages",
                page_index,
                self.model.page_count
            );
            return false;
        }
        self.pagination.update(PaginationState {
            page_index,
            ..current
        });
        self.refresh();
        true
    }

    /// Change the page size and return to the first page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let current = *self.pagination.get();
        if page_size == 0 || (page_size == current.page_size && current.page_index == 0) {
            return false;
        }
        debug!("Page size -> {}", page_size);
        self.pagination.update(PaginationState {
            page_index: 0,
            page_size,
        });
        self.refresh();
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            trace!("next_page ignored: on last page");
            return false;
        }
        let index = self.pagination.get().page_index + 1;
        self.set_page_index(index)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            trace!("previous_page ignored: on first page");
            return false;
        }
        let current = *self.pagination.get();
        // Stranded past the end after the rows shrank: land on the last page.
        let page_index = (current.page_index - 1).min(self.model.page_count.saturating_sub(1));
        self.pagination.update(PaginationState {
            page_index,
            ..current
        });
        self.refresh();
        true
    }

    fn reset_page_index(&mut self) {
        let current = *self.pagination.get();
        if current.page_index != 0 {
            self.pagination.update(current.first_page());
        }
    }

    // ============ Selection ============

    pub fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    pub fn selection(&self) -> &RowSelection {
        self.selection.get()
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &RowId> {
        self.selection.get().ids()
    }

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selection.get().is_selected(id)
    }

    pub fn toggle_row(&mut self, id: &str) -> bool {
        if !self.selection_enabled {
            return false;
        }
        let next = self.selection.get().toggled(id);
        self.selection.update(next);
        true
    }

    /// Select or clear every row on the current page.
    pub fn toggle_all_on_page(&mut self, target: bool) -> bool {
        if !self.selection_enabled || self.model.is_empty() {
            return false;
        }
        let next = self.selection.get().with_page(self.model.ids(), target);
        if &next == self.selection.get() {
            return false;
        }
        debug!("Page selection -> {} ({} selected)", target, next.len());
        self.selection.update(next);
        true
    }

    pub fn page_selection_state(&self) -> CheckState {
        self.selection.get().page_state(self.model.ids())
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.selection_enabled || self.selection.get().is_empty() {
            return false;
        }
        self.selection.update(RowSelection::new());
        true
    }

    // ============ Activation ============

    /// Rows take keyboard focus and activation only with a click handler.
    pub fn rows_activatable(&self) -> bool {
        self.on_row_click.is_some()
    }

    /// Invoke the row click handler for the row with `id`.
    pub fn activate_row(&mut self, id: &str) -> bool {
        let Some(index) = self
            .model
            .visible
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.index)
        else {
            return false;
        };
        match self.on_row_click.as_mut() {
            Some(handler) => {
                handler(&self.rows[index]);
                true
            }
            None => false,
        }
    }

    // ============ Controlled state ============

    pub fn sync_sorting(&mut self, sorting: SortState) {
        if self.sorting.sync(sorting) {
            self.refresh();
        }
    }

    pub fn sync_column_filters(&mut self, filters: ColumnFilters) {
        if self.column_filters.sync(filters) {
            self.refresh();
        }
    }

    pub fn sync_global_filter(&mut self, filter: impl Into<String>) {
        if self.global_filter.sync(filter.into()) {
            self.refresh();
        }
    }

    pub fn sync_pagination(&mut self, pagination: PaginationState) {
        if self.pagination.sync(pagination) {
            self.refresh();
        }
    }

    pub fn sync_selection(&mut self, selection: RowSelection) {
        self.selection.sync(selection);
    }
}
