// Core layer - configuration, localized strings, time source
pub mod core;

// Features layer - reminder store and notification scheduling
pub mod features;

// TUI layer - terminal user interface
#[cfg(feature = "tui")]
pub mod tui;

// Re-export core items
pub use crate::core::{Clock, Config, Locale, Strings, SystemClock};

// Re-export feature items
pub use features::{
    // Notifications
    CalendarTrigger, LocalNotificationCenter, NotificationCenter, NotificationDelegate,
    NotificationRequest, NotificationScheduler, SchedulerState,
    // Reminders
    Reminder, ReminderId, ReminderStore, StoreError, StoreEvent,
};
