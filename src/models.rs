use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Habit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    #[default]
    Active,
    Failed,
    /// Internalised; no longer tracked daily.
    Completed,
}

impl HabitStatus {
    pub fn label(self) -> &'static str {
        match self {
            HabitStatus::Active => "active",
            HabitStatus::Failed => "failed",
            HabitStatus::Completed => "completed",
        }
    }

    /// Next value of the status filter: all -> active -> failed -> completed -> all.
    pub fn cycle_filter(current: Option<HabitStatus>) -> Option<HabitStatus> {
        match current {
            None => Some(HabitStatus::Active),
            Some(HabitStatus::Active) => Some(HabitStatus::Failed),
            Some(HabitStatus::Failed) => Some(HabitStatus::Completed),
            Some(HabitStatus::Completed) => None,
        }
    }

    pub fn from_label(label: &str) -> Option<HabitStatus> {
        match label {
            "active" => Some(HabitStatus::Active),
            "failed" => Some(HabitStatus::Failed),
            "completed" => Some(HabitStatus::Completed),
            _ => None,
        }
    }
}

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub status: HabitStatus,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub last_check_in: Option<NaiveDate>,
}

impl Habit {
    pub fn new(title: String, notes: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            notes,
            created_at: Local::now(),
            status: HabitStatus::Active,
            streak_days: 0,
            last_check_in: None,
        }
    }

    pub fn days_active(&self) -> i64 {
        let duration = Local::now() - self.created_at;
        duration.num_days().max(0)
    }
}

/// Outcome of checking an active habit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckIn {
    Recorded(u32),
    AlreadyToday(u32),
}

/// TOML file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitFile {
    pub meta: FileMeta,
    #[serde(default)]
    pub habits: Vec<Habit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMeta {
    pub version: String,
    pub created_at: DateTime<Local>,
    pub last_modified: DateTime<Local>,
}

pub const FILE_VERSION: &str = "1.0";

impl Default for HabitFile {
    fn default() -> Self {
        let now = Local::now();
        Self {
            meta: FileMeta {
                version: FILE_VERSION.to_string(),
                created_at: now,
                last_modified: now,
            },
            habits: Vec::new(),
        }
    }
}

/// In-memory habit collection. Order is insertion order.
#[derive(Debug, Clone)]
pub struct HabitStore {
    habits: Vec<Habit>,
    created_at: DateTime<Local>,
    pub dirty: bool,
}

impl HabitStore {
    pub fn new() -> Self {
        Self {
            habits: Vec::new(),
            created_at: Local::now(),
            dirty: false,
        }
    }

    pub fn from_file(file: HabitFile) -> Self {
        Self {
            habits: file.habits,
            created_at: file.meta.created_at,
            dirty: false,
        }
    }

    pub fn to_file(&self) -> HabitFile {
        HabitFile {
            meta: FileMeta {
                version: FILE_VERSION.to_string(),
                created_at: self.created_at,
                last_modified: Local::now(),
            },
            habits: self.habits.clone(),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Add a habit and return its id
    pub fn add(&mut self, title: String, notes: String) -> String {
        let habit = Habit::new(title, notes);
        let id = habit.id.clone();
        self.habits.push(habit);
        self.dirty = true;
        id
    }

    /// Remove habits by id, returning how many were removed
    pub fn remove<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        let ids: Vec<&str> = ids.into_iter().collect();
        let before = self.habits.len();
        self.habits.retain(|h| !ids.contains(&h.id.as_str()));
        let removed = before - self.habits.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn set_status(&mut self, id: &str, status: HabitStatus) -> bool {
        match self.habits.iter_mut().find(|h| h.id == id) {
            Some(habit) if habit.status != status => {
                habit.status = status;
                if status == HabitStatus::Failed {
                    habit.streak_days = 0;
                }
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Record today's progress on an active habit. `None` if the habit is
    /// missing or not active.
    pub fn check_in(&mut self, id: &str) -> Option<CheckIn> {
        self.check_in_on(id, Local::now().date_naive())
    }

    /// At most one check-in counts per calendar day.
    pub fn check_in_on(&mut self, id: &str, day: NaiveDate) -> Option<CheckIn> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id && h.status == HabitStatus::Active)?;
        if habit.last_check_in == Some(day) {
            return Some(CheckIn::AlreadyToday(habit.streak_days));
        }
        habit.streak_days += 1;
        habit.last_check_in = Some(day);
        self.dirty = true;
        Some(CheckIn::Recorded(habit.streak_days))
    }
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut store = HabitStore::new();
        let a = store.add("Read".to_string(), "".to_string());
        let b = store.add("Run".to_string(), "5k".to_string());
        let _c = store.add("Sleep".to_string(), "".to_string());
        assert_eq!(store.habits().len(), 3);
        assert!(store.dirty);

        let removed = store.remove([a.as_str(), b.as_str(), "missing"]);
        assert_eq!(removed, 2);
        assert_eq!(store.habits().len(), 1);
        assert_eq!(store.habits()[0].title, "Sleep");
    }

    #[test]
    fn test_fail_resets_streak() {
        let mut store = HabitStore::new();
        let id = store.add("Read".to_string(), "".to_string());
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(store.check_in_on(&id, day), Some(CheckIn::Recorded(1)));
        assert_eq!(store.check_in_on(&id, day.succ_opt().unwrap()), Some(CheckIn::Recorded(2)));

        assert!(store.set_status(&id, HabitStatus::Failed));
        assert_eq!(store.get(&id).map(|h| h.streak_days), Some(0));
        assert_eq!(store.check_in(&id), None);
        assert!(!store.set_status(&id, HabitStatus::Failed));
    }

    #[test]
    fn test_check_in_counts_once_per_day() {
        let mut store = HabitStore::new();
        let id = store.add("Stretch".to_string(), "".to_string());
        let day = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();

        assert_eq!(store.check_in_on(&id, day), Some(CheckIn::Recorded(1)));
        store.dirty = false;
        assert_eq!(store.check_in_on(&id, day), Some(CheckIn::AlreadyToday(1)));
        assert!(!store.dirty);
        assert_eq!(store.get(&id).map(|h| h.last_check_in), Some(Some(day)));
    }

    #[test]
    fn test_days_active() {
        use chrono::Duration;

        let mut habit = Habit::new("Test".to_string(), "".to_string());
        assert_eq!(habit.days_active(), 0);

        habit.created_at = Local::now() - Duration::days(5);
        assert_eq!(habit.days_active(), 5);
    }

    #[test]
    fn test_status_filter_cycle() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = HabitStatus::cycle_filter(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(HabitStatus::Active),
                Some(HabitStatus::Failed),
                Some(HabitStatus::Completed),
                None
            ]
        );
        assert_eq!(HabitStatus::from_label("failed"), Some(HabitStatus::Failed));
    }
}
