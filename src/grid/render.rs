//! Dual presentation of a grid: dense table and stacked cards.
//!
//! Both presentations are projected from the same row model on every frame;
//! the terminal width only decides which one is drawn.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use super::column::ColumnWidth;
use super::selection::{CheckState, RowId};
use super::sorting::SortDirection;
use super::DataGrid;

/// Terminal width below which cards replace the table.
pub const DEFAULT_CARD_BREAKPOINT: u16 = 80;

const SELECT_COLUMN_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Table,
    Cards,
}

impl Presentation {
    pub fn for_width(width: u16, breakpoint: u16, has_cards: bool) -> Self {
        if has_cards && width < breakpoint {
            Presentation::Cards
        } else {
            Presentation::Table
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: String,
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    pub fn display(&self) -> String {
        match self.sort {
            Some(SortDirection::Ascending) => format!("{} ▲", self.label),
            Some(SortDirection::Descending) => format!("{} ▼", self.label),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowView {
    pub id: RowId,
    /// `None` when row selection is disabled.
    pub selected: Option<bool>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProjection {
    pub select_all: Option<CheckState>,
    pub header: Vec<HeaderCell>,
    pub widths: Vec<ColumnWidth>,
    pub rows: Vec<TableRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: RowId,
    pub selected: Option<bool>,
    pub body: Text<'static>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProjection {
    pub select_all: Option<CheckState>,
    pub cards: Vec<CardView>,
}

/// Both presentations of one grid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualView {
    pub table: TableProjection,
    pub cards: Option<CardProjection>,
    pub empty_message: String,
    pub breakpoint: u16,
    pub activatable: bool,
}

impl DualView {
    pub fn project<R>(grid: &DataGrid<R>) -> Self {
        let selection_enabled = grid.selection_enabled();
        let select_all = selection_enabled.then(|| grid.page_selection_state());
        let selected = |id: &RowId| selection_enabled.then(|| grid.is_row_selected(id));

        let header = grid
            .columns()
            .iter()
            .map(|column| HeaderCell {
                column_id: column.id.clone(),
                label: column.header.clone(),
                sortable: column.sortable,
                sort: grid.sort_direction(&column.id),
            })
            .collect();

        let rows = grid
            .visible_rows()
            .map(|(visible, row)| TableRowView {
                id: visible.id.clone(),
                selected: selected(&visible.id),
                cells: grid.columns().iter().map(|c| c.render_cell(row)).collect(),
            })
            .collect();

        let cards = grid.has_card_renderer().then(|| CardProjection {
            select_all,
            cards: grid
                .visible_rows()
                .map(|(visible, row)| CardView {
                    id: visible.id.clone(),
                    selected: selected(&visible.id),
                    body: grid.render_card(row).unwrap_or_default(),
                })
                .collect(),
        });

        Self {
            table: TableProjection {
                select_all,
                header,
                widths: grid.columns().iter().map(|c| c.width).collect(),
                rows,
            },
            cards,
            empty_message: grid.empty_message().to_string(),
            breakpoint: grid.card_breakpoint(),
            activatable: grid.rows_activatable(),
        }
    }

    pub fn presentation(&self, width: u16) -> Presentation {
        Presentation::for_width(width, self.breakpoint, self.cards.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    /// Row ids in the order the given presentation lists them.
    pub fn row_ids(&self, presentation: Presentation) -> Vec<&RowId> {
        match (presentation, &self.cards) {
            (Presentation::Cards, Some(cards)) => cards.cards.iter().map(|c| &c.id).collect(),
            _ => self.table.rows.iter().map(|r| &r.id).collect(),
        }
    }
}

fn selection_marker(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn constraint(width: ColumnWidth) -> Constraint {
    match width {
        ColumnWidth::Fixed(n) => Constraint::Length(n),
        ColumnWidth::Fill(weight) => Constraint::Fill(weight),
    }
}

/// Draw the grid into `area`. `focus` is the focused position on the page.
pub fn render_grid(frame: &mut Frame, area: Rect, view: &DualView, title: &str, focus: Option<usize>) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    if view.is_empty() {
        let empty = Paragraph::new(view.empty_message.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let focus = if view.activatable { focus } else { None };
    match (view.presentation(area.width), &view.cards) {
        (Presentation::Cards, Some(cards)) => render_cards(frame, area, cards, block, focus),
        _ => render_table(frame, area, &view.table, block, focus),
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    table: &TableProjection,
    block: Block<'_>,
    focus: Option<usize>,
) {
    let mut header_cells: Vec<Cell> = Vec::new();
    let mut widths: Vec<Constraint> = Vec::new();
    if let Some(state) = table.select_all {
        header_cells.push(Cell::from(state.marker()));
        widths.push(Constraint::Length(SELECT_COLUMN_WIDTH));
    }
    for (cell, width) in table.header.iter().zip(&table.widths) {
        header_cells.push(Cell::from(cell.display()));
        widths.push(constraint(*width));
    }
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells: Vec<Cell> = Vec::with_capacity(row.cells.len() + 1);
            if let Some(selected) = row.selected {
                cells.push(Cell::from(selection_marker(selected)));
            }
            cells.extend(row.cells.iter().map(|c| Cell::from(c.clone())));
            let style = if row.selected == Some(true) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    state.select(focus);
    frame.render_stateful_widget(widget, area, &mut state);
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    cards: &CardProjection,
    block: Block<'_>,
    focus: Option<usize>,
) {
    let block = match cards.select_all {
        Some(state) => block.title_bottom(format!("{} select page", state.marker())),
        None => block,
    };

    let items: Vec<ListItem> = cards
        .cards
        .iter()
        .map(|card| {
            let mut text = card.body.clone();
            if let Some(selected) = card.selected {
                let marker = Span::raw(format!("{} ", selection_marker(selected)));
                match text.lines.first_mut() {
                    Some(line) => line.spans.insert(0, marker),
                    None => text.lines.push(Line::from(marker)),
                }
            }
            text.lines.push(Line::default());
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(focus);
    frame.render_stateful_widget(list, area, &mut state);
}
