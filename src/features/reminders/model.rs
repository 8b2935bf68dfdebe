//! Reminder entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage row id; only used to address rows, never displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReminderId(pub i64);

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    /// Set when the reminder is saved, never changed afterwards
    pub timestamp: DateTime<Utc>,
    pub is_checked: bool,
}

impl Reminder {
    /// Ordering key of the list view: time first, then creation order
    pub fn sort_key(&self) -> (DateTime<Utc>, ReminderId) {
        (self.timestamp, self.id)
    }
}
