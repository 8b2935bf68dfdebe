//! Callbacks for delivered notifications.

use crate::features::notifications::center::{
    Notification, NotificationResponse, PresentationOptions, ResponseAction,
};
use log::info;

/// Receives delivered notifications while the app is running
pub trait NotificationDelegate: Send + Sync {
    /// Decide how to surface a notification that fires in the foreground
    fn will_present(&self, notification: &Notification) -> PresentationOptions;

    /// The user reacted to a notification
    fn did_receive(&self, response: &NotificationResponse);
}

/// Keeps notifications visible while the app is open
#[derive(Debug, Default, Clone, Copy)]
pub struct ForegroundDelegate;

impl NotificationDelegate for ForegroundDelegate {
    fn will_present(&self, _notification: &Notification) -> PresentationOptions {
        PresentationOptions::FOREGROUND
    }

    fn did_receive(&self, response: &NotificationResponse) {
        let action = match response.action {
            ResponseAction::Default => "opened",
            ResponseAction::Dismiss => "dismissed",
        };
        info!(
            "User {} notification '{}' ({})",
            action, response.notification.request.identifier, response.notification.id
        );
    }
}
