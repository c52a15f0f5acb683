//! Application error type.

use std::io;

use thiserror::Error;

use crate::grid::GridError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {path}: {source}")]
    TomlDe {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize data: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("could not locate the user {0} directory")]
    NoDir(&'static str),
    #[error("invalid grid setup: {0}")]
    Grid(#[from] GridError),
    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, AppError>;
