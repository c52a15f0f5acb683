//! Column descriptors and typed cell values.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Local};

/// Value produced by a column accessor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Local>),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Timestamp(_) => 4,
        }
    }

    /// Natural ordering: numeric for numbers, lexicographic for text,
    /// chronological for timestamps. Mixed kinds order by kind, empty first.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64).total_cmp(b),
            (CellValue::Float(a), CellValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Int(i64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<DateTime<Local>> for CellValue {
    fn from(t: DateTime<Local>) -> Self {
        CellValue::Timestamp(t)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// How a column filter compares its value against the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMatch {
    /// Case-insensitive substring, for free-text inputs.
    #[default]
    Contains,
    /// Display form must equal the filter value.
    Exact,
}

/// Presentation width of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    Fixed(u16),
    Fill(u16),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Fill(1)
    }
}

type Accessor<R> = Box<dyn Fn(&R) -> CellValue>;
type CellFormatter<R> = Box<dyn Fn(&R) -> String>;

/// A column bound to rows of type `R`.
pub struct Column<R> {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    pub filterable: bool,
    pub filter_match: FilterMatch,
    pub width: ColumnWidth,
    accessor: Accessor<R>,
    cell: Option<CellFormatter<R>>,
}

impl<R> Column<R> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: true,
            filterable: true,
            filter_match: FilterMatch::default(),
            width: ColumnWidth::default(),
            accessor: Box::new(accessor),
            cell: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn exact_filter(mut self) -> Self {
        self.filter_match = FilterMatch::Exact;
        self
    }

    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    pub fn fill(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Fill(weight);
        self
    }

    /// Custom cell text. Sorting and filtering still use the accessor value.
    pub fn cell(mut self, formatter: impl Fn(&R) -> String + 'static) -> Self {
        self.cell = Some(Box::new(formatter));
        self
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render_cell(&self, row: &R) -> String {
        match &self.cell {
            Some(formatter) => formatter(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_match", &self.filter_match)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Find a column by id.
pub fn find_column<'a, R>(columns: &'a [Column<R>], id: &str) -> Option<&'a Column<R>> {
    columns.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_ordering_numbers_and_text() {
        assert_eq!(CellValue::Int(2).natural_cmp(&CellValue::Int(10)), Ordering::Less);
        assert_eq!(
            CellValue::Float(2.5).natural_cmp(&CellValue::Int(2)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::from("apple").natural_cmp(&CellValue::from("banana")),
            Ordering::Less
        );
        assert_eq!(CellValue::Empty.natural_cmp(&CellValue::Int(0)), Ordering::Less);
    }

    #[test]
    fn test_cell_falls_back_to_value_display() {
        let plain: Column<(String, i64)> = Column::new("n", "N", |r: &(String, i64)| r.1.into());
        let custom: Column<(String, i64)> =
            Column::new("s", "S", |r: &(String, i64)| r.0.clone().into())
                .cell(|r: &(String, i64)| format!("<{}>", r.0));

        let row = ("bob".to_string(), 7);
        assert_eq!(plain.render_cell(&row), "7");
        assert_eq!(custom.render_cell(&row), "<bob>");
        assert_eq!(custom.value(&row), CellValue::from("bob"));
    }
}
