//! Key event mapping (Input -> Action)

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// Map a key press to an action for the current mode
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveFocusDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveFocusUp),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PreviousPage),
            KeyCode::Char('+') => Some(Action::GrowPage),
            KeyCode::Char('-') => Some(Action::ShrinkPage),
            KeyCode::Char(c @ '1'..='5') => Some(Action::ToggleSort(c as usize - '1' as usize)),
            KeyCode::Char('s') => Some(Action::CycleStatusFilter),
            KeyCode::Char('/') => Some(Action::StartSearch),
            KeyCode::Char(' ') => Some(Action::ToggleSelect),
            KeyCode::Char('v') => Some(Action::TogglePageSelection),
            KeyCode::Esc => Some(Action::ClearSelection),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Char('a') => Some(Action::StartAddHabit),
            KeyCode::Char('x') => Some(Action::MarkFailed),
            KeyCode::Char('c') => Some(Action::MarkCompleted),
            KeyCode::Char('d') => Some(Action::StartDelete),
            _ => None,
        },
        AppMode::Searching | AppMode::AddingHabit => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Submit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// Handle a key press. Returns true when the app should quit.
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_map_to_columns() {
        assert_eq!(
            get_action(&AppMode::Normal, KeyCode::Char('1')),
            Some(Action::ToggleSort(0))
        );
        assert_eq!(
            get_action(&AppMode::Normal, KeyCode::Char('5')),
            Some(Action::ToggleSort(4))
        );
        assert_eq!(get_action(&AppMode::Normal, KeyCode::Char('6')), None);
    }

    #[test]
    fn test_typing_in_search_mode() {
        assert_eq!(
            get_action(&AppMode::Searching, KeyCode::Char('q')),
            Some(Action::Input('q'))
        );
        assert_eq!(get_action(&AppMode::Searching, KeyCode::Esc), Some(Action::Cancel));
    }
}
