//! File logging. The terminal belongs to the UI, so logs go to
//! `<data_dir>/habitgrid/habitgrid.log`.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::error::Result;

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("habitgrid.log")
}

pub fn init(data_dir: &Path, level: LevelFilter) -> Result<PathBuf> {
    let path = log_path(data_dir);
    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    log::info!("Logging at {} to {}", level, path.display());
    Ok(path)
}
