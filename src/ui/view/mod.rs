//! View layer
//!
//! Main render entry and screen sections

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::state::{App, AppMode, ConfirmAction, InputField};
use crate::grid::{DualView, render_grid};
use components::{centered_rect, render_dialog_framework, render_input_widget};

/// Render the whole UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title / search
            Constraint::Min(6),    // grid
            Constraint::Length(1), // pager
            Constraint::Length(3), // help
        ])
        .split(frame.area());

    if app.mode == AppMode::Searching {
        render_input_widget(frame, chunks[0], "Search", &app.input_buffer, true, Color::Yellow);
    } else {
        render_title(frame, app, chunks[0]);
    }

    let view = DualView::project(&app.grid);
    let grid_title = format!("Habits ({})", app.grid.model().total_filtered);
    render_grid(frame, chunks[1], &view, &grid_title, Some(app.cursor));

    render_pager(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    match &app.mode {
        AppMode::AddingHabit => render_add_dialog(frame, app),
        AppMode::Confirm(action) => render_confirm_dialog(frame, action),
        _ => {}
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "habitgrid",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(format!("  {} tracked", app.habit_count())));
    if !app.grid.global_filter().is_empty() {
        spans.push(Span::raw(format!("  search: \"{}\"", app.grid.global_filter())));
    }
    if let Some(status) = app.status_filter() {
        spans.push(Span::raw(format!("  status: {}", status.label())));
    }
    let selected = app.grid.selection().len();
    if selected > 0 {
        spans.push(Span::styled(
            format!("  {} selected", selected),
            Style::default().fg(Color::Yellow),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_pager(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);
    let pagination = app.grid.pagination();
    let page_count = app.grid.page_count().max(1);

    let line = Line::from(vec![
        Span::styled(
            "◀ prev ",
            if app.grid.can_previous_page() { enabled } else { disabled },
        ),
        Span::raw(format!(
            "page {} of {} ({} per page) ",
            pagination.page_index + 1,
            page_count,
            pagination.page_size
        )),
        Span::styled(
            "next ▶",
            if app.grid.can_next_page() { enabled } else { disabled },
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            "[a] add  [enter] check in  [x] fail  [c] complete  [d] delete  [space/v] select  [/] search  [s] status  [1-5] sort  [h/l] page  [+/-] size  [q] quit"
        }
        AppMode::Searching => "Type to filter  [Enter] keep  [Esc] clear",
        AppMode::AddingHabit => match app.input_field {
            InputField::Title => "Type a title, then [Enter]  [Esc] cancel",
            InputField::Notes => "Optional notes, then [Enter]  [Esc] cancel",
        },
        AppMode::Confirm(_) => "[y] confirm  [n] cancel",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, frame.area());
    let inner = render_dialog_framework(frame, area, "New habit");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(inner);

    let is_title_active = app.input_field == InputField::Title;
    let title_val = if is_title_active {
        &app.input_buffer
    } else {
        &app.temp_title
    };
    render_input_widget(frame, chunks[0], "Title", title_val, is_title_active, Color::Yellow);

    let is_notes_active = app.input_field == InputField::Notes;
    let notes_val = if is_notes_active { app.input_buffer.as_str() } else { "" };
    render_input_widget(
        frame,
        chunks[1],
        "Notes (optional)",
        notes_val,
        is_notes_active,
        Color::Yellow,
    );
}

fn render_confirm_dialog(frame: &mut Frame, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::Delete(ids) => format!("Delete {} habit(s)?", ids.len()),
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] confirm  [n] cancel", message))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("Confirm").borders(Borders::ALL));

    frame.render_widget(dialog, area);
}
