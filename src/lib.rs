//! habitgrid: a terminal habit tracker built on a generic data grid.
//!
//! The reusable part is [`grid`]; the rest is the tracker application.

pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;
