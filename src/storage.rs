use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{HabitFile, HabitStore};

/// Load habits from a TOML file. A missing file yields an empty store.
pub fn load_store(path: &Path) -> Result<HabitStore> {
    if !path.exists() {
        info!("No data file at {}, starting empty", path.display());
        return Ok(HabitStore::new());
    }

    let content = fs::read_to_string(path)?;
    let file: HabitFile = toml::from_str(&content).map_err(|source| AppError::TomlDe {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Loaded {} habits from {}", file.habits.len(), path.display());

    Ok(HabitStore::from_file(file))
}

/// Save habits to a TOML file. Clean stores are not written.
pub fn save_store(store: &mut HabitStore, path: &Path) -> Result<bool> {
    if !store.dirty {
        return Ok(false);
    }

    let content = toml::to_string_pretty(&store.to_file())?;
    fs::write(path, content)?;
    info!("Saved {} habits to {}", store.habits().len(), path.display());

    store.dirty = false;
    Ok(true)
}
