//! # Notification Scheduler
//!
//! Asks for permission once at startup and, if granted, schedules the
//! drink-water alert for 19:07 local time under a fixed identifier, so
//! launching again replaces the pending alert instead of stacking a new one.
//!
//! Nothing here is fatal: a denial or a rejected request is logged and the
//! rest of the app carries on.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::{Clock, Strings};
use crate::features::notifications::center::{
    AuthorizationOptions, CalendarTrigger, NotificationCenter, NotificationContent,
    NotificationRequest,
};
use crate::features::notifications::delegate::NotificationDelegate;
use crate::features::notifications::delivery::{spawn_delivery, PresentedNotification};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifier of the one request this app ever schedules
pub const HYDRATION_REQUEST_ID: &str = "UniqueIdentifier";
pub const HYDRATION_HOUR: u32 = 19;
pub const HYDRATION_MINUTE: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Permission not granted (only the user's settings can change that)
    Unauthorized,
    /// Permission granted; the alert has been handed to the center
    Authorized,
}

/// The drink-water alert: one-shot, next 19:07 local time
pub fn hydration_request(strings: &Strings) -> NotificationRequest {
    NotificationRequest {
        identifier: HYDRATION_REQUEST_ID.to_string(),
        content: NotificationContent {
            title: strings.notification_title.to_string(),
            body: strings.notification_body.to_string(),
            sound: true,
        },
        trigger: CalendarTrigger {
            hour: HYDRATION_HOUR,
            minute: HYDRATION_MINUTE,
            repeats: false,
        },
    }
}

pub struct NotificationScheduler {
    center: Arc<dyn NotificationCenter>,
    delegate: Arc<dyn NotificationDelegate>,
    request: NotificationRequest,
    state: SchedulerState,
}

impl NotificationScheduler {
    pub fn new(
        center: Arc<dyn NotificationCenter>,
        delegate: Arc<dyn NotificationDelegate>,
        strings: &Strings,
    ) -> Self {
        NotificationScheduler {
            center,
            delegate,
            request: hydration_request(strings),
            state: SchedulerState::Unauthorized,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Request permission, then schedule the alert if allowed
    pub async fn start(&mut self) -> SchedulerState {
        if self.state == SchedulerState::Unauthorized {
            match self
                .center
                .request_authorization(AuthorizationOptions::ALL)
                .await
            {
                Ok(true) => {
                    info!("Notifications allowed");
                    self.state = SchedulerState::Authorized;
                }
                Ok(false) => {
                    info!("Notifications denied");
                    return self.state;
                }
                Err(e) => {
                    warn!("Notification authorization failed: {}", e);
                    return self.state;
                }
            }
        }

        if let Err(e) = self.center.add(self.request.clone()).await {
            warn!("Failed to schedule notification: {}", e);
        }

        self.state
    }

    /// Start delivering to the bound delegate; does nothing unless authorized
    pub fn spawn_delivery(
        &self,
        clock: Arc<dyn Clock>,
        presented: mpsc::UnboundedSender<PresentedNotification>,
        interval: Duration,
    ) -> Option<JoinHandle<()>> {
        if self.state != SchedulerState::Authorized {
            return None;
        }
        Some(spawn_delivery(
            self.center.clone(),
            self.delegate.clone(),
            clock,
            presented,
            interval,
        ))
    }
}
