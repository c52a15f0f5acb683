use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::prelude::*;

use habitgrid::config::{self, AppConfig};
use habitgrid::error::Result;
use habitgrid::logging;
use habitgrid::storage::{load_store, save_store};
use habitgrid::ui::{self, App, render};

fn main() -> Result<()> {
    let config = AppConfig::load(&config::config_path()?)?;
    let data_dir = config::data_dir()?;
    logging::init(&data_dir, config.level_filter())?;

    // <data_dir>/habitgrid/data.toml unless overridden
    let data_path = config
        .data_file
        .clone()
        .unwrap_or_else(|| data_dir.join("data.toml"));
    let store = load_store(&data_path)?;
    let mut app = App::new(store, &config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }

    if save_store(&mut app.store, &data_path)? {
        println!("Saved to {}", data_path.display());
    }
    info!("Exiting");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                break;
            }
        }
    }
    Ok(())
}
