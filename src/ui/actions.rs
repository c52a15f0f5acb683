//! Action enum (Intent)
//!
//! Key presses are translated into these semantic actions.

/// User action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveFocusUp,
    MoveFocusDown,

    // Grid
    NextPage,
    PreviousPage,
    GrowPage,
    ShrinkPage,
    /// Toggle sorting on the nth column (0-based).
    ToggleSort(usize),
    CycleStatusFilter,
    StartSearch,
    ToggleSelect,
    TogglePageSelection,
    ClearSelection,
    Activate,

    // Records
    StartAddHabit,
    MarkFailed,
    MarkCompleted,
    StartDelete,

    // Forms
    Cancel,      // Esc / n
    Submit,      // Enter / y
    Input(char), // typed character
    DeleteChar,  // Backspace
}
