//! Action dispatch (Update)

use log::{debug, info};

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, InputField, STATUS_COLUMN};
use crate::grid::CheckState;
use crate::models::{CheckIn, HabitStatus};

const PAGE_SIZE_STEP: usize = 5;

impl App {
    /// Apply an action. Returns true when the app should quit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveFocusUp => self.move_up(),
            Action::MoveFocusDown => self.move_down(),

            Action::NextPage => self.change_page(true),
            Action::PreviousPage => self.change_page(false),
            Action::GrowPage => self.resize_page(true),
            Action::ShrinkPage => self.resize_page(false),
            Action::ToggleSort(n) => self.toggle_sort(n),
            Action::CycleStatusFilter => self.cycle_status_filter(),
            Action::StartSearch => self.start_search(),
            Action::ToggleSelect => self.toggle_select(),
            Action::TogglePageSelection => self.toggle_page_selection(),
            Action::ClearSelection => {
                if self.grid.clear_selection() {
                    self.message = Some("Selection cleared".to_string());
                }
            }
            Action::Activate => self.activate(),

            Action::StartAddHabit => self.start_add_habit(),
            Action::MarkFailed => self.mark_status(HabitStatus::Failed),
            Action::MarkCompleted => self.mark_status(HabitStatus::Completed),
            Action::StartDelete => self.start_delete(),

            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::AddingHabit => match self.input_field {
                    InputField::Title => {
                        if !self.input_buffer.trim().is_empty() {
                            self.move_to_notes_input();
                        }
                    }
                    InputField::Notes => self.confirm_add_habit(),
                },
                AppMode::Searching => self.mode = AppMode::Normal,
                AppMode::Confirm(_) => self.execute_confirm(),
                AppMode::Normal => {}
            },

            Action::Input(c) => match self.mode {
                AppMode::AddingHabit => self.input_buffer.push(c),
                AppMode::Searching => {
                    self.input_buffer.push(c);
                    self.apply_search();
                }
                _ => {}
            },

            Action::DeleteChar => match self.mode {
                AppMode::AddingHabit => {
                    self.input_buffer.pop();
                }
                AppMode::Searching => {
                    self.input_buffer.pop();
                    self.apply_search();
                }
                _ => {}
            },
        }
        false
    }

    // ============ Navigation ============

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.grid.model().visible.len() {
            self.cursor += 1;
        }
    }

    fn change_page(&mut self, forward: bool) {
        let moved = if forward {
            self.grid.next_page()
        } else {
            self.grid.previous_page()
        };
        if moved {
            self.cursor = 0;
        }
    }

    fn resize_page(&mut self, grow: bool) {
        let size = self.grid.pagination().page_size;
        let next = if grow {
            size + PAGE_SIZE_STEP
        } else {
            size.saturating_sub(PAGE_SIZE_STEP).max(1)
        };
        if self.grid.set_page_size(next) {
            self.cursor = 0;
            self.message = Some(format!("{} habits per page", next));
        }
    }

    // ============ Sorting / filtering ============

    fn toggle_sort(&mut self, n: usize) {
        let Some(column_id) = self.grid.columns().get(n).map(|c| c.id.clone()) else {
            return;
        };
        if self.grid.toggle_sort(&column_id) {
            self.clamp_cursor();
        }
    }

    fn cycle_status_filter(&mut self) {
        let next = HabitStatus::cycle_filter(self.status_filter());
        let value = next.map(HabitStatus::label).unwrap_or("");
        self.grid.set_column_filter(STATUS_COLUMN, value);
        self.cursor = 0;
        self.message = Some(match next {
            Some(status) => format!("Showing {} habits", status.label()),
            None => "Showing all habits".to_string(),
        });
    }

    pub fn start_search(&mut self) {
        self.input_buffer = self.grid.global_filter().to_string();
        self.mode = AppMode::Searching;
    }

    /// Every keystroke refilters; the latest text wins.
    fn apply_search(&mut self) {
        let text = self.input_buffer.clone();
        self.grid.set_global_filter(&text);
        self.cursor = 0;
    }

    // ============ Selection ============

    fn toggle_select(&mut self) {
        if let Some(id) = self.focused_id() {
            self.grid.toggle_row(&id);
        }
    }

    fn toggle_page_selection(&mut self) {
        let target = self.grid.page_selection_state() != CheckState::Checked;
        self.grid.toggle_all_on_page(target);
    }

    /// Selected habits, or the focused one when nothing is selected.
    pub fn target_ids(&self) -> Vec<String> {
        let selected: Vec<String> = self
            .grid
            .selected_ids()
            .filter(|id| self.store.get(id).is_some())
            .cloned()
            .collect();
        if !selected.is_empty() {
            return selected;
        }
        self.focused_id().into_iter().collect()
    }

    // ============ Records ============

    /// Enter on a row checks the habit in for today.
    fn activate(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        if !self.grid.activate_row(&id) {
            return;
        }
        let activated: Vec<String> = self.activations.borrow_mut().drain(..).collect();
        for id in activated {
            match self.store.check_in(&id) {
                Some(CheckIn::Recorded(streak)) => {
                    debug!("Checked in {} (streak {})", id, streak);
                    self.message = Some(format!("Checked in, streak {} d", streak));
                }
                Some(CheckIn::AlreadyToday(streak)) => {
                    self.message = Some(format!("Already checked in today, streak {} d", streak));
                }
                None => self.message = Some("Only active habits can be checked in".to_string()),
            }
        }
        self.refresh_rows();
    }

    pub fn start_add_habit(&mut self) {
        self.mode = AppMode::AddingHabit;
        self.input_buffer.clear();
        self.input_field = InputField::Title;
        self.temp_title.clear();
    }

    pub fn move_to_notes_input(&mut self) {
        self.temp_title = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        self.input_field = InputField::Notes;
    }

    pub fn confirm_add_habit(&mut self) {
        let title = std::mem::take(&mut self.temp_title);
        let notes = std::mem::take(&mut self.input_buffer);
        let id = self.store.add(title, notes);
        info!("Added habit {}", id);
        self.refresh_rows();
        self.mode = AppMode::Normal;
        self.message = Some("Habit added".to_string());
    }

    fn mark_status(&mut self, status: HabitStatus) {
        let ids = self.target_ids();
        let changed = ids
            .iter()
            .filter(|id| self.store.set_status(id, status))
            .count();
        if changed > 0 {
            self.refresh_rows();
        }
        self.message = Some(format!("{} habit(s) marked {}", changed, status.label()));
    }

    pub fn start_delete(&mut self) {
        let ids = self.target_ids();
        if !ids.is_empty() {
            self.mode = AppMode::Confirm(ConfirmAction::Delete(ids));
        }
    }

    pub fn execute_confirm(&mut self) {
        if let AppMode::Confirm(ConfirmAction::Delete(ids)) = &self.mode {
            let removed = self.store.remove(ids.iter().map(String::as_str));
            info!("Deleted {} habits", removed);
            self.message = Some(format!("Deleted {} habit(s)", removed));
            self.grid.clear_selection();
            self.refresh_rows();
        }
        self.mode = AppMode::Normal;
    }

    // ============ General ============

    /// Leave the current mode. Cancelling a search clears it.
    pub fn cancel(&mut self) {
        if self.mode == AppMode::Searching {
            self.input_buffer.clear();
            self.apply_search();
        }
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::HabitStore;

    fn app(titles: &[&str]) -> App {
        let mut store = HabitStore::new();
        for title in titles {
            store.add(title.to_string(), String::new());
        }
        let config = AppConfig {
            page_size: 2,
            ..AppConfig::default()
        };
        App::new(store, &config).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn test_add_habit_flow() {
        let mut app = app(&[]);
        app.dispatch(Action::StartAddHabit);
        type_text(&mut app, "Meditate");
        app.dispatch(Action::Submit);
        type_text(&mut app, "10 min");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.habit_count(), 1);
        assert_eq!(app.focused().map(|h| h.notes.as_str()), Some("10 min"));
    }

    #[test]
    fn test_search_and_cancel() {
        let mut app = app(&["Read", "Run", "Sleep"]);
        app.dispatch(Action::StartSearch);
        type_text(&mut app, "r");
        assert_eq!(app.grid.model().total_filtered, 2);
        app.dispatch(Action::Cancel);
        assert_eq!(app.grid.global_filter(), "");
        assert_eq!(app.grid.model().total_filtered, 3);
    }

    #[test]
    fn test_activate_checks_in() {
        let mut app = app(&["Read"]);
        app.dispatch(Action::Activate);
        assert_eq!(app.focused().map(|h| h.streak_days), Some(1));
        assert!(app.store.dirty);

        app.dispatch(Action::Activate);
        assert_eq!(app.focused().map(|h| h.streak_days), Some(1));
    }

    #[test]
    fn test_delete_selected_across_pages() {
        let mut app = app(&["A", "B", "C"]);
        app.dispatch(Action::ToggleSelect);
        app.dispatch(Action::NextPage);
        app.dispatch(Action::ToggleSelect);
        assert_eq!(app.grid.selection().len(), 2);

        app.dispatch(Action::StartDelete);
        app.dispatch(Action::Submit);
        assert_eq!(app.habit_count(), 1);
        assert_eq!(app.focused().map(|h| h.title.as_str()), Some("B"));
        assert_eq!(app.grid.pagination().page_index, 0);
        assert!(app.grid.selection().is_empty());
    }

    #[test]
    fn test_status_filter_cycles() {
        let mut app = app(&["A", "B"]);
        app.dispatch(Action::MarkFailed);
        app.dispatch(Action::CycleStatusFilter);
        assert_eq!(app.status_filter(), Some(HabitStatus::Active));
        assert_eq!(app.grid.model().total_filtered, 1);
        app.dispatch(Action::CycleStatusFilter);
        assert_eq!(app.grid.model().total_filtered, 1);
        assert_eq!(app.focused().map(|h| h.title.as_str()), Some("A"));
    }
}
