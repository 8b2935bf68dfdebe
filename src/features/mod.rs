//! # Features
//!
//! - `reminders`: durable, sorted list of drink-water check marks
//! - `notifications`: permission request and the fixed daily-time alert

pub mod notifications;
pub mod reminders;

pub use notifications::{
    CalendarTrigger, LocalNotificationCenter, Notification, NotificationCenter,
    NotificationDelegate, NotificationError, NotificationRequest, NotificationScheduler,
    SchedulerState,
};
pub use reminders::{Reminder, ReminderId, ReminderStore, StoreError, StoreEvent};
