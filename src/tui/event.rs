//! # TUI Event Handling
//!
//! Keyboard, tick, store and notification events merged into one stream.

use crate::features::notifications::{PresentedNotification, SchedulerState};
use crate::features::reminders::StoreEvent;
use crate::tui::Screen;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates
    Tick,
    /// Committed store change
    Store(StoreEvent),
    /// Store events were dropped; the view must be rebuilt
    StoreLagged,
    /// Notification fired while the app is open
    Notification(PresentedNotification),
    /// Permission request finished
    Scheduler(SchedulerState),
}

/// Event handler that combines keyboard, store and notification events
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn keyboard event handler
        let key_tx = tx.clone();
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let sent = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => key_tx.send(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(w, h)) => key_tx.send(Event::Resize(w, h)),
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            } else if key_tx.send(Event::Tick).is_err() {
                break;
            }
        });

        (EventHandler { rx }, tx)
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Forward store changes into the event stream
pub fn forward_store_events(
    mut store_rx: broadcast::Receiver<StoreEvent>,
    tx: mpsc::UnboundedSender<Event>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match store_rx.recv().await {
                Ok(event) => Event::Store(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("UI lagged behind the store by {} events", skipped);
                    Event::StoreLagged
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    })
}

/// Forward delivered notifications into the event stream
pub fn forward_notifications(
    mut presented_rx: mpsc::UnboundedReceiver<PresentedNotification>,
    tx: mpsc::UnboundedSender<Event>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(presented) = presented_rx.recv().await {
            if tx.send(Event::Notification(presented)).is_err() {
                break;
            }
        }
    })
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Jump to first row
    Home,
    /// Jump to last row
    End,
    /// Open the add sheet
    OpenSheet,
    /// Save from the add sheet
    Save,
    /// Close the add sheet without saving
    Cancel,
    /// Flip the selected row's check mark
    Toggle,
    /// Delete the selected row
    Delete,
    /// Open the notification banner
    Acknowledge,
    /// Dismiss the notification banner
    Dismiss,
}

/// Map a key event to an action
pub fn map_key_event(key: KeyEvent, screen: Screen) -> KeyAction {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return KeyAction::Quit;
    }

    match screen {
        Screen::AddSheet => match key.code {
            KeyCode::Enter | KeyCode::Char('s') => KeyAction::Save,
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => KeyAction::Cancel,
            _ => KeyAction::None,
        },
        Screen::List => match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,

            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::Home,
            (KeyCode::End, _) | (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::End,

            // Actions
            (KeyCode::Char('a'), KeyModifiers::NONE)
            | (KeyCode::Char('+'), _)
            | (KeyCode::Insert, _) => KeyAction::OpenSheet,
            (KeyCode::Char(' '), KeyModifiers::NONE) | (KeyCode::Char('t'), KeyModifiers::NONE) => {
                KeyAction::Toggle
            }
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => KeyAction::Delete,

            // Banner
            (KeyCode::Enter, _) => KeyAction::Acknowledge,
            (KeyCode::Esc, _) => KeyAction::Dismiss,

            _ => KeyAction::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_list_keys() {
        assert_eq!(map_key_event(key(KeyCode::Char('q')), Screen::List), KeyAction::Quit);
        assert_eq!(map_key_event(key(KeyCode::Char('a')), Screen::List), KeyAction::OpenSheet);
        assert_eq!(map_key_event(key(KeyCode::Char(' ')), Screen::List), KeyAction::Toggle);
        assert_eq!(map_key_event(key(KeyCode::Char('d')), Screen::List), KeyAction::Delete);
        assert_eq!(map_key_event(key(KeyCode::Down), Screen::List), KeyAction::Down);
        assert_eq!(map_key_event(key(KeyCode::Enter), Screen::List), KeyAction::Acknowledge);
    }

    #[test]
    fn test_sheet_keys_do_not_leak_list_actions() {
        assert_eq!(map_key_event(key(KeyCode::Enter), Screen::AddSheet), KeyAction::Save);
        assert_eq!(map_key_event(key(KeyCode::Esc), Screen::AddSheet), KeyAction::Cancel);
        assert_eq!(map_key_event(key(KeyCode::Char('q')), Screen::AddSheet), KeyAction::Cancel);
        assert_eq!(map_key_event(key(KeyCode::Char('d')), Screen::AddSheet), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(ctrl_c, Screen::List), KeyAction::Quit);
        assert_eq!(map_key_event(ctrl_c, Screen::AddSheet), KeyAction::Quit);
    }

    #[tokio::test]
    async fn test_store_events_are_forwarded() {
        use crate::core::FixedClock;
        use crate::features::reminders::ReminderStore;
        use chrono::{TimeZone, Utc};
        use std::sync::Arc;

        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 9, 8, 0, 0).unwrap()));
        let mut store = ReminderStore::open_in_memory(clock).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _forwarder = forward_store_events(store.subscribe(), tx);

        let reminder = store.create().unwrap();

        match rx.recv().await {
            Some(Event::Store(StoreEvent::Created(created))) => assert_eq!(created, reminder),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
