//! # Reminders Feature
//!
//! Timestamped check marks, persisted in sqlite and kept sorted by time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod format;
pub mod model;
pub mod store;

pub use model::{Reminder, ReminderId};
pub use store::{ReminderStore, StoreError, StoreEvent};
