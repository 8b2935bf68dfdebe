//! # HydroMinder
//!
//! Terminal app for ticking off glasses of water, with a 19:07 reminder.
//!
//! Usage: `cargo run --bin hydrominder`

use anyhow::{Context, Result};
use crossterm::{
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use hydrominder::core::{Clock, Config, Strings, SystemClock};
use hydrominder::features::notifications::{
    ForegroundDelegate, LocalNotificationCenter, NotificationCenter, NotificationDelegate,
    NotificationScheduler,
};
use hydrominder::features::reminders::ReminderStore;
use hydrominder::tui::event::{forward_notifications, forward_store_events, map_key_event};
use hydrominder::tui::{App, Event, EventHandler};

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize logging; stdout belongs to the UI
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting HydroMinder...");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let strings = Strings::for_locale(config.locale);

    let mut store = ReminderStore::open(&config.database_path, clock.clone())
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    let delegate: Arc<dyn NotificationDelegate> = Arc::new(ForegroundDelegate);
    let mut app = App::new(config.locale, store.list(), delegate.clone());

    // Create event handler
    let (mut events, event_tx) = EventHandler::new(TICK_RATE);
    forward_store_events(store.subscribe(), event_tx.clone());

    let (presented_tx, presented_rx) = mpsc::unbounded_channel();
    forward_notifications(presented_rx, event_tx.clone());

    // Permission and scheduling run beside the UI; the outcome only feeds the status bar
    match LocalNotificationCenter::open(
        &config.notifications_path,
        config.notification_permission,
        clock.clone(),
    ) {
        Ok(center) => {
            let center: Arc<dyn NotificationCenter> = Arc::new(center);
            let mut scheduler = NotificationScheduler::new(center, delegate, strings);
            let poll_interval = config.delivery_poll_interval;
            let scheduler_tx = event_tx.clone();
            tokio::spawn(async move {
                let state = scheduler.start().await;
                // Detached; runs until the UI drops its receiver
                let _delivery = scheduler.spawn_delivery(clock, presented_tx, poll_interval);
                let _ = scheduler_tx.send(Event::Scheduler(state));
            });
        }
        Err(e) => {
            warn!("Notification center unavailable: {}", e);
            app.error_message = Some(format!("Notifications unavailable: {}", e));
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut events, &mut store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {}", e);
        return Err(e);
    }

    info!("HydroMinder shutdown complete");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    store: &mut ReminderStore,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            hydrominder::tui::ui::render(frame, app, chrono::Local::now());
        })?;

        if app.take_bell() {
            execute!(terminal.backend_mut(), Print('\x07'))?;
        }

        // Handle events
        match events.next().await {
            Some(Event::Key(key)) => {
                let action = map_key_event(key, app.screen);
                app.handle_action(action, store);
            }
            Some(Event::Store(event)) => app.handle_store_event(event),
            Some(Event::StoreLagged) => app.resync(store),
            Some(Event::Notification(presented)) => app.handle_notification(presented),
            Some(Event::Scheduler(state)) => app.set_scheduler_state(state),
            Some(Event::Tick) | Some(Event::Resize(_, _)) => {
                // Redrawn at the top of the loop
            }
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
