//! Selection engine: identity-keyed row selection with page-scoped select-all.
//!
//! Every operation returns a new [`RowSelection`]; the receiver is never
//! mutated. Entries for rows that are not currently visible are kept as-is.

use std::collections::BTreeSet;

/// Key used to address a row across sorting, filtering and paging.
pub type RowId = String;

/// Select-all checkbox state for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
    Indeterminate,
}

impl CheckState {
    pub fn marker(self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Unchecked => "[ ]",
            CheckState::Indeterminate => "[-]",
        }
    }
}

/// Sparse set of selected row ids. Absence means unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: BTreeSet<RowId>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RowId>,
    {
        Self {
            selected: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    pub fn toggled(&self, id: &str) -> Self {
        let mut selected = self.selected.clone();
        if !selected.remove(id) {
            selected.insert(id.to_string());
        }
        Self { selected }
    }

    /// Set every id in `page` to `target`, leaving other entries untouched.
    pub fn with_page<'a>(&self, page: impl IntoIterator<Item = &'a RowId>, target: bool) -> Self {
        let mut selected = self.selected.clone();
        for id in page {
            if target {
                selected.insert(id.clone());
            } else {
                selected.remove(id);
            }
        }
        Self { selected }
    }

    /// Tri-state summary over the ids on the current page.
    ///
    /// An empty page is `Unchecked`.
    pub fn page_state<'a>(&self, page: impl IntoIterator<Item = &'a RowId>) -> CheckState {
        let (mut total, mut hits) = (0usize, 0usize);
        for id in page {
            total += 1;
            if self.selected.contains(id) {
                hits += 1;
            }
        }
        match hits {
            0 => CheckState::Unchecked,
            n if n == total => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<RowId> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    #[test]
    fn test_tri_state() {
        let page = page();
        let none = RowSelection::new();
        assert_eq!(none.page_state(&page), CheckState::Unchecked);

        let one = none.toggled("b");
        assert_eq!(one.page_state(&page), CheckState::Indeterminate);

        let all = one.with_page(&page, true);
        assert_eq!(all.page_state(&page), CheckState::Checked);
        assert_eq!(RowSelection::new().page_state(&[]), CheckState::Unchecked);
    }

    #[test]
    fn test_updates_do_not_mutate_original() {
        let original = RowSelection::from_ids(["a"]);
        let toggled = original.toggled("a");
        assert!(original.is_selected("a"));
        assert!(!toggled.is_selected("a"));
    }

    #[test]
    fn test_page_clear_keeps_other_pages() {
        let selection = RowSelection::from_ids(["a", "z"]);
        let cleared = selection.with_page(&page(), false);
        assert_eq!(cleared, RowSelection::from_ids(["z"]));
    }
}
