use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::time::Duration;

mod actions;
mod capabilities;
mod dispatcher;
mod logger;
mod middleware;
mod reducers;
mod state;
mod store;
mod views;

use actions::{Action, BrowserAction, GlobalAction};
use middleware::{KeyboardMiddleware, LoggingMiddleware, ShareMiddleware};
use sharetail_config::AppConfig;
use state::AppState;
use store::Store;

fn main() -> anyhow::Result<()> {
    // A .env file may carry SHARETAIL_ROOT and RUST_LOG
    let _ = dotenvy::dotenv();

    let log_file = logger::init()?;
    log::info!("Starting sharetail, logging to {}", log_file.display());

    let config = AppConfig::load();
    log::debug!("Config: {:?}", config);

    // Initialize store with middleware
    let mut store = Store::new(AppState::new(config.clone()));

    // Add middleware in order (they execute in this order)
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(KeyboardMiddleware::new()));
    store.add_middleware(Box::new(ShareMiddleware::new(&config)?));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    store.dispatch(Action::Browser(BrowserAction::LoadShares));

    // Main event loop
    let result = run_app(&mut terminal, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Event loop failed: {}", err);
    }

    log::info!("Exiting sharetail");
    Ok(result?)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut Store,
) -> io::Result<()> {
    loop {
        // Render
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(store.state(), area, frame);
        })?;

        // Check if we should quit
        if !store.state().running {
            break;
        }

        // Handle events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    store.dispatch(Action::Global(GlobalAction::KeyPressed(key)));
                }
            }
        }

        // Results from async share operations and tail events
        store.process_pending();
    }

    Ok(())
}
