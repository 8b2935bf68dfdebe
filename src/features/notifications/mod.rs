//! # Notifications Feature
//!
//! Permission request plus one fixed-time drink-water alert, delivered
//! through a local notification center.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod center;
pub mod delegate;
pub mod delivery;
pub mod local;
pub mod scheduler;

pub use center::{
    AuthorizationOptions, CalendarTrigger, Notification, NotificationCenter, NotificationContent,
    NotificationError, NotificationRequest, NotificationResponse, PendingRequest,
    PresentationOptions, ResponseAction,
};
pub use delegate::{ForegroundDelegate, NotificationDelegate};
pub use delivery::{deliver_due, spawn_delivery, PresentedNotification};
pub use local::LocalNotificationCenter;
pub use scheduler::{
    hydration_request, NotificationScheduler, SchedulerState, HYDRATION_REQUEST_ID,
};
