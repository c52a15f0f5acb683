//! App state (Model)

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::config::AppConfig;
use crate::grid::{Column, DataGrid, GridError, PaginationState};
use crate::models::{Habit, HabitStatus, HabitStore};

pub const STATUS_COLUMN: &str = "status";

/// Application state
pub struct App {
    pub store: HabitStore,
    pub grid: DataGrid<Habit>,
    /// Focused position on the current page.
    pub cursor: usize,
    pub mode: AppMode,
    pub input_buffer: String,
    pub input_field: InputField,
    pub message: Option<String>,
    pub temp_title: String,
    /// Ids of rows activated through the grid, drained by `dispatch`.
    pub activations: Rc<RefCell<Vec<String>>>,
}

/// Application mode
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Searching,
    AddingHabit,
    Confirm(ConfirmAction),
}

/// Actions that need a y/n confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Delete(Vec<String>),
}

/// Field being typed into while adding a habit
#[derive(Debug, Clone, PartialEq)]
pub enum InputField {
    Title,
    Notes,
}

fn status_color(status: HabitStatus) -> Color {
    match status {
        HabitStatus::Active => Color::Green,
        HabitStatus::Failed => Color::Red,
        HabitStatus::Completed => Color::Blue,
    }
}

/// Column set shown for habits. Number keys 1..=5 toggle sorting on the
/// first five columns.
pub fn habit_columns() -> Vec<Column<Habit>> {
    vec![
        Column::new("title", "Habit", |h: &Habit| h.title.clone().into()).fill(3),
        Column::new(STATUS_COLUMN, "Status", |h: &Habit| h.status.label().into())
            .exact_filter()
            .fixed(10),
        Column::new("streak", "Streak", |h: &Habit| h.streak_days.into())
            .cell(|h: &Habit| format!("{} d", h.streak_days))
            .fixed(8),
        Column::new("age", "Days", |h: &Habit| h.days_active().into()).fixed(6),
        Column::new("created", "Created", |h: &Habit| h.created_at.into()).fixed(17),
        Column::new("notes", "Notes", |h: &Habit| h.notes.clone().into())
            .sortable(false)
            .fill(2),
    ]
}

/// Stacked card used on narrow terminals.
pub fn habit_card(habit: &Habit) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            habit.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                habit.status.label(),
                Style::default().fg(status_color(habit.status)),
            ),
            Span::raw(format!(
                " | streak {} d | since {}",
                habit.streak_days,
                habit.created_at.format("%Y-%m-%d")
            )),
        ]),
    ];
    if !habit.notes.is_empty() {
        lines.push(Line::from(Span::styled(
            habit.notes.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    Text::from(lines)
}

impl App {
    pub fn new(store: HabitStore, config: &AppConfig) -> Result<Self, GridError> {
        let activations = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&activations);

        let grid = DataGrid::builder(habit_columns())
            .rows(store.habits().to_vec())
            .row_id(|h: &Habit| h.id.clone())
            .enable_row_selection()
            .initial_pagination(PaginationState::with_size(config.page_size))
            .render_card(habit_card)
            .card_breakpoint(config.card_breakpoint)
            .on_row_click(move |h: &Habit| sink.borrow_mut().push(h.id.clone()))
            .empty_message("No habits match. Press 'a' to add one or '/' to change the search.")
            .build()?;

        Ok(Self {
            store,
            grid,
            cursor: 0,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            input_field: InputField::Title,
            message: None,
            temp_title: String::new(),
            activations,
        })
    }

    /// Push the store's habits into the grid and keep the cursor on the page.
    pub fn refresh_rows(&mut self) {
        self.grid.set_rows(self.store.habits().to_vec());
        // Rows removed from under the current page: step back to the last one.
        if self.grid.model().is_empty() && self.grid.can_previous_page() {
            self.grid.previous_page();
        }
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.grid.model().visible.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Currently focused habit
    pub fn focused(&self) -> Option<&Habit> {
        self.grid.visible_row(self.cursor).map(|(_, habit)| habit)
    }

    pub fn focused_id(&self) -> Option<String> {
        self.grid
            .visible_row(self.cursor)
            .map(|(visible, _)| visible.id.clone())
    }

    pub fn status_filter(&self) -> Option<HabitStatus> {
        self.grid
            .column_filter(STATUS_COLUMN)
            .and_then(HabitStatus::from_label)
    }

    pub fn habit_count(&self) -> usize {
        self.store.habits().len()
    }
}
