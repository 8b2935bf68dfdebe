//! # Notification Center Boundary
//!
//! The platform service the app talks to: ask for permission, hand over
//! requests, read back what is pending. Requests are keyed by identifier;
//! adding a request whose identifier is already pending replaces it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notifications are not authorized")]
    NotAuthorized,

    #[error("Invalid trigger: {0}")]
    InvalidTrigger(String),

    #[error("Notification request rejected: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Kinds of interruption the app asks permission for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl AuthorizationOptions {
    pub const ALL: AuthorizationOptions = AuthorizationOptions {
        alert: true,
        sound: true,
        badge: true,
    };
}

/// How a notification is surfaced while the app is in the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresentationOptions {
    /// Show it in the notification list / banner
    pub list: bool,
    pub badge: bool,
    pub sound: bool,
}

impl PresentationOptions {
    pub const NONE: PresentationOptions = PresentationOptions {
        list: false,
        badge: false,
        sound: false,
    };

    pub const FOREGROUND: PresentationOptions = PresentationOptions {
        list: true,
        badge: true,
        sound: true,
    };

    pub fn is_suppressed(&self) -> bool {
        *self == Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// Play the default sound
    pub sound: bool,
}

/// Fires when the local wall clock matches `hour:minute`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTrigger {
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
}

impl CalendarTrigger {
    pub fn new(hour: u32, minute: u32, repeats: bool) -> Result<Self, NotificationError> {
        if hour > 23 || minute > 59 {
            return Err(NotificationError::InvalidTrigger(format!(
                "{:02}:{:02} is not a wall-clock time",
                hour, minute
            )));
        }
        Ok(CalendarTrigger {
            hour,
            minute,
            repeats,
        })
    }

    /// First matching instant strictly after `after`, in `after`'s time zone.
    ///
    /// A day where `hour:minute` does not exist (DST gap) is skipped.
    pub fn next_fire_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        let tz = after.timezone();
        let mut date = after.date_naive();

        for _ in 0..3 {
            if let Some(candidate) = tz.from_local_datetime(&date.and_time(time)).earliest() {
                if candidate > *after {
                    return Some(candidate);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub identifier: String,
    pub content: NotificationContent,
    pub trigger: CalendarTrigger,
}

/// A request waiting for its trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub request: NotificationRequest,
    pub fire_at: DateTime<Utc>,
}

/// A request whose trigger has fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub request: NotificationRequest,
    pub delivered_at: DateTime<Utc>,
}

/// What the user did with a delivered notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseAction {
    /// Opened / acknowledged
    Default,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    pub notification: Notification,
    pub action: ResponseAction,
}

/// Local notification service
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Ask the user for permission; `Ok(false)` means denied
    async fn request_authorization(
        &self,
        options: AuthorizationOptions,
    ) -> Result<bool, NotificationError>;

    /// Schedule a request, replacing any pending one with the same identifier
    async fn add(&self, request: NotificationRequest) -> Result<(), NotificationError>;

    async fn pending_requests(&self) -> Result<Vec<PendingRequest>, NotificationError>;

    async fn remove_pending(&self, identifiers: &[String]) -> Result<(), NotificationError>;

    /// Hand out every request due at `now`; one-shot requests leave the pending set
    async fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>, NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_trigger_rejects_impossible_time() {
        assert!(CalendarTrigger::new(24, 0, false).is_err());
        assert!(CalendarTrigger::new(19, 60, false).is_err());
        assert!(CalendarTrigger::new(19, 7, false).is_ok());
    }

    #[test]
    fn test_next_fire_later_same_day() {
        let trigger = CalendarTrigger::new(19, 7, false).unwrap();
        let now = kst().with_ymd_and_hms(2024, 4, 9, 8, 0, 0).unwrap();

        let fire = trigger.next_fire_after(&now).unwrap();

        assert_eq!(fire, kst().with_ymd_and_hms(2024, 4, 9, 19, 7, 0).unwrap());
    }

    #[test]
    fn test_next_fire_rolls_to_tomorrow() {
        let trigger = CalendarTrigger::new(19, 7, false).unwrap();
        let now = kst().with_ymd_and_hms(2024, 4, 9, 19, 7, 0).unwrap();

        let fire = trigger.next_fire_after(&now).unwrap();

        assert_eq!(fire, kst().with_ymd_and_hms(2024, 4, 10, 19, 7, 0).unwrap());
        assert_eq!((fire.hour(), fire.minute()), (19, 7));
    }

    #[test]
    fn test_foreground_options_are_not_suppressed() {
        assert!(!PresentationOptions::FOREGROUND.is_suppressed());
        assert!(PresentationOptions::NONE.is_suppressed());
        assert!(PresentationOptions::default().is_suppressed());
    }
}
