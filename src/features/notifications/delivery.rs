//! # Delivery Loop
//!
//! Polls the notification center for due requests and hands them to the
//! bound delegate. Anything the delegate does not suppress is forwarded to
//! the UI.

use crate::core::Clock;
use crate::features::notifications::center::{
    Notification, NotificationCenter, NotificationError, PresentationOptions,
};
use crate::features::notifications::delegate::NotificationDelegate;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A delivered notification together with how it should be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedNotification {
    pub notification: Notification,
    pub options: PresentationOptions,
}

/// Deliver everything due at the clock's current time.
///
/// Returns how many notifications were forwarded.
pub async fn deliver_due(
    center: &dyn NotificationCenter,
    delegate: &dyn NotificationDelegate,
    clock: &dyn Clock,
    presented: &mpsc::UnboundedSender<PresentedNotification>,
) -> Result<usize, NotificationError> {
    let due = center.take_due(clock.now()).await?;
    let mut forwarded = 0;

    for notification in due {
        let options = delegate.will_present(&notification);
        if options.is_suppressed() {
            debug!(
                "Notification '{}' suppressed by delegate",
                notification.request.identifier
            );
            continue;
        }

        info!("Delivering notification '{}'", notification.request.identifier);
        if presented
            .send(PresentedNotification {
                notification,
                options,
            })
            .is_err()
        {
            break;
        }
        forwarded += 1;
    }

    Ok(forwarded)
}

/// Run [`deliver_due`] every `interval` until the receiving side goes away
pub fn spawn_delivery(
    center: Arc<dyn NotificationCenter>,
    delegate: Arc<dyn NotificationDelegate>,
    clock: Arc<dyn Clock>,
    presented: mpsc::UnboundedSender<PresentedNotification>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if presented.is_closed() {
                debug!("Notification receiver closed, stopping delivery loop");
                break;
            }
            if let Err(e) = deliver_due(&*center, &*delegate, &*clock, &presented).await {
                warn!("Notification delivery failed: {}", e);
            }
        }
    })
}
