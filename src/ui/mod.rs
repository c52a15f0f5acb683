//! UI module
//!
//! MVI (Model-View-Intent):
//! - Model (state.rs): the `App` struct and its grid
//! - View (view/): pure functions mapping state to widgets
//! - Intent (actions.rs): key presses turned into semantic actions

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

pub use input::handle_key_event;
pub use state::App;
pub use view::render;
