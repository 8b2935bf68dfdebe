//! # TUI Application Core
//!
//! Screen state, the reminder snapshot kept in step with store events, and
//! the notification banner.

use crate::core::{Locale, Strings};
use crate::features::notifications::{
    NotificationDelegate, NotificationResponse, PresentedNotification, ResponseAction,
    SchedulerState,
};
use crate::features::reminders::{Reminder, ReminderStore, StoreError, StoreEvent};
use crate::tui::event::KeyAction;
use log::{error, info};
use std::sync::Arc;

/// The list screen, optionally covered by the add sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    AddSheet,
}

/// Main application state
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Whether the app should quit
    pub should_quit: bool,
    pub locale: Locale,
    pub strings: &'static Strings,
    /// Snapshot of the store, sorted by timestamp
    pub reminders: Vec<Reminder>,
    /// Selected row
    pub selected_index: usize,
    /// Notification permission outcome, once known
    pub scheduler_state: Option<SchedulerState>,
    /// Delivered notifications not yet looked at
    pub badge_count: usize,
    /// Most recent notification shown in the foreground
    pub banner: Option<PresentedNotification>,
    /// Ring the terminal bell on the next frame
    pub bell: bool,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    delegate: Arc<dyn NotificationDelegate>,
}

impl App {
    pub fn new(
        locale: Locale,
        reminders: &[Reminder],
        delegate: Arc<dyn NotificationDelegate>,
    ) -> Self {
        App {
            screen: Screen::List,
            should_quit: false,
            locale,
            strings: Strings::for_locale(locale),
            reminders: reminders.to_vec(),
            selected_index: 0,
            scheduler_state: None,
            badge_count: 0,
            banner: None,
            bell: false,
            error_message: None,
            status_message: None,
            delegate,
        }
    }

    pub fn selected(&self) -> Option<&Reminder> {
        self.reminders.get(self.selected_index)
    }

    /// Apply a committed store change to the snapshot
    pub fn handle_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Created(reminder) => {
                // Already present when replayed after a resync
                if self.reminders.iter().any(|r| r.id == reminder.id) {
                    return;
                }
                let key = reminder.sort_key();
                let pos = self.reminders.partition_point(|r| r.sort_key() <= key);
                self.reminders.insert(pos, reminder);
                self.selected_index = pos;
            }
            StoreEvent::Updated(reminder) => {
                if let Some(slot) = self.reminders.iter_mut().find(|r| r.id == reminder.id) {
                    *slot = reminder;
                }
            }
            StoreEvent::Deleted(id) => {
                self.reminders.retain(|r| r.id != id);
                self.clamp_selection();
            }
        }
    }

    /// Rebuild the snapshot after missed events
    pub fn resync(&mut self, store: &ReminderStore) {
        self.reminders = store.list().to_vec();
        self.clamp_selection();
    }

    /// Show a notification that fired while the app is open
    pub fn handle_notification(&mut self, presented: PresentedNotification) {
        if presented.options.badge {
            self.badge_count += 1;
        }
        if presented.options.sound {
            self.bell = true;
        }
        if presented.options.list {
            self.banner = Some(presented);
        }
    }

    /// Whether to ring the bell; resets the flag
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    /// Perform a key action; store mutations reach the snapshot via events
    pub fn handle_action(&mut self, action: KeyAction, store: &mut ReminderStore) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Up => self.selected_index = self.selected_index.saturating_sub(1),
            KeyAction::Down => {
                if self.selected_index + 1 < self.reminders.len() {
                    self.selected_index += 1;
                }
            }
            KeyAction::Home => self.selected_index = 0,
            KeyAction::End => self.selected_index = self.reminders.len().saturating_sub(1),
            KeyAction::OpenSheet => {
                self.clear_messages();
                self.screen = Screen::AddSheet;
            }
            KeyAction::Cancel => self.screen = Screen::List,
            KeyAction::Save => {
                let result = store.create();
                if self.report(result, Some(self.strings.saved)).is_some() {
                    self.screen = Screen::List;
                }
            }
            KeyAction::Toggle => {
                if let Some(id) = self.selected().map(|r| r.id) {
                    let result = store.toggle(id);
                    self.report(result, None);
                }
            }
            KeyAction::Delete => {
                if let Some(id) = self.selected().map(|r| r.id) {
                    let result = store.delete(id);
                    self.report(result, Some(self.strings.deleted));
                }
            }
            KeyAction::Acknowledge => self.respond(ResponseAction::Default),
            KeyAction::Dismiss => self.respond(ResponseAction::Dismiss),
        }
    }

    fn respond(&mut self, action: ResponseAction) {
        if let Some(presented) = self.banner.take() {
            self.delegate.did_receive(&NotificationResponse {
                notification: presented.notification,
                action,
            });
            self.badge_count = 0;
        }
    }

    /// Surface the outcome of a store operation in the status bar
    fn report(
        &mut self,
        result: Result<Reminder, StoreError>,
        confirmation: Option<&'static str>,
    ) -> Option<Reminder> {
        match result {
            Ok(reminder) => {
                self.error_message = None;
                self.status_message = confirmation.map(str::to_string);
                Some(reminder)
            }
            Err(e) => {
                error!("Store operation failed: {}", e);
                self.error_message = Some(e.to_string());
                self.status_message = None;
                None
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.reminders.len() {
            self.selected_index = self.reminders.len().saturating_sub(1);
        }
    }

    /// Record how the permission request went
    pub fn set_scheduler_state(&mut self, state: SchedulerState) {
        info!("Notification scheduler is {:?}", state);
        self.scheduler_state = Some(state);
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }
}
