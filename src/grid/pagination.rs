//! Pagination engine.

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    pub fn with_size(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Same size, first page.
    pub fn first_page(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }
}

/// Where page slicing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    /// Slice the filtered and sorted rows locally.
    #[default]
    Client,
    /// Rows arrive already sliced; the page count comes from the data source.
    Server { page_count: usize },
}

/// Number of pages for `total` rows. Zero rows means zero pages.
pub fn client_page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

pub fn page_count(mode: PageMode, total: usize, page_size: usize) -> usize {
    match mode {
        PageMode::Client => client_page_count(total, page_size),
        PageMode::Server { page_count } => page_count,
    }
}

pub fn can_previous(state: &PaginationState) -> bool {
    state.page_index > 0
}

pub fn can_next(state: &PaginationState, page_count: usize) -> bool {
    state.page_index + 1 < page_count
}

/// Page window `[start, end)` over `total` rows, clipped to the row count.
pub fn page_window(state: &PaginationState, total: usize) -> (usize, usize) {
    let start = state.page_index.saturating_mul(state.page_size).min(total);
    let end = start.saturating_add(state.page_size).min(total);
    (start, end)
}
