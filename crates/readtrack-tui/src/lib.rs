pub mod app;
pub mod event;
pub mod keys;
pub mod popup;
pub mod theme;
pub mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use readtrack_core::{AppConfig, LibraryService};
use tokio::runtime::Handle;

use app::App;
use app::async_tasks::TaskSpawner;
use event::{AppEvent, EventHandler};

/// Run the full TUI application.
///
/// Service calls are spawned on `runtime`; their results come back through
/// the event loop, which is the only place application state is mutated.
pub fn run_tui(
    config: AppConfig,
    service: Arc<dyn LibraryService>,
    runtime: Handle,
) -> Result<()> {
    // Install panic hook
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = std::io::stdout().execute(crossterm::terminal::LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new(config.ui.tick_rate());
    let tasks = TaskSpawner::new(runtime, service, event_handler.sender());
    let mut app = App::new(config, tasks);
    app.load();
    tracing::info!("tui started");

    let outcome = event_loop(&mut terminal, &mut event_handler, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    tracing::info!("tui stopped");
    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    event_handler: &mut EventHandler,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => keys::handle_key(app, key.code, key.modifiers),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => app.on_tick(),
            AppEvent::Service(event) => app.handle_service_event(event),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
