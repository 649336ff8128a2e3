//! TUI module
//!
//! Provides the terminal user interface: a header, one resource table for
//! the selected kind and namespace, and a footer with key hints.

pub mod app;
pub mod constants;
pub mod keybindings;
pub mod operations;
pub mod table;
pub mod theme;
pub mod views;

pub use app::*;
pub use operations::*;
pub use table::{Column, ResourceTable, RowFormatter, TableAction};
pub use theme::*;

use crate::sync::ResourceSync;
use anyhow::Result;
use constants::EVENT_POLL_MS;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI application
pub async fn run_tui(sync: Arc<ResourceSync>, context: String, settings: AppSettings) -> Result<()> {
    tracing::debug!("Initializing TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(sync, context, settings);
    let result = event_loop(&mut terminal, &mut app).await;

    tracing::debug!("TUI shutting down");

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    app.request_fetch();
    tracing::debug!("TUI initialized, entering main loop");

    loop {
        terminal.draw(|f| app.render(f))?;

        app.drain_messages();
        app.tick();

        // Handle input events (non-blocking)
        if event::poll(Duration::from_millis(EVENT_POLL_MS))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            return Ok(());
        }

        // Let spawned fetches make progress between polls
        tokio::task::yield_now().await;
    }
}
