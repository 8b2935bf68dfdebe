//! # Local Notification Center
//!
//! File-backed notification service for the terminal. Pending requests live
//! in a JSON file so they survive restarts; permission comes from the user's
//! configuration and cannot be changed from inside the app.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::{Clock, Permission};
use crate::features::notifications::center::{
    AuthorizationOptions, Notification, NotificationCenter, NotificationError,
    NotificationRequest, PendingRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// On-disk layout of the pending requests file
#[derive(Debug, Default, Serialize, Deserialize)]
struct PendingFile {
    pending: Vec<PendingRequest>,
}

pub struct LocalNotificationCenter {
    path: PathBuf,
    permission: Permission,
    clock: Arc<dyn Clock>,
    pending: Mutex<Vec<PendingRequest>>,
}

impl LocalNotificationCenter {
    /// Load pending requests from `path` (missing file means none)
    pub fn open(
        path: impl AsRef<Path>,
        permission: Permission,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NotificationError> {
        let path = path.as_ref().to_path_buf();

        let pending = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let file: PendingFile = serde_json::from_str(&contents)?;
            file.pending
        } else {
            Vec::new()
        };

        debug!(
            "Loaded {} pending notification(s) from {}",
            pending.len(),
            path.display()
        );

        Ok(LocalNotificationCenter {
            path,
            permission,
            clock,
            pending: Mutex::new(pending),
        })
    }

    /// Write through a temp file so a crash never leaves half a file
    fn persist(&self, pending: &[PendingRequest]) -> Result<(), NotificationError> {
        let file = PendingFile {
            pending: pending.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn next_fire(
        &self,
        request: &NotificationRequest,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, NotificationError> {
        request
            .trigger
            .next_fire_after(&after.with_timezone(&Local))
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                NotificationError::Rejected(format!(
                    "trigger for '{}' never fires",
                    request.identifier
                ))
            })
    }
}

#[async_trait]
impl NotificationCenter for LocalNotificationCenter {
    async fn request_authorization(
        &self,
        options: AuthorizationOptions,
    ) -> Result<bool, NotificationError> {
        let granted = self.permission == Permission::Allow;
        debug!(
            "Authorization requested (alert={}, sound={}, badge={}): granted={}",
            options.alert, options.sound, options.badge, granted
        );
        Ok(granted)
    }

    async fn add(&self, request: NotificationRequest) -> Result<(), NotificationError> {
        if self.permission == Permission::Deny {
            return Err(NotificationError::NotAuthorized);
        }

        let fire_at = self.next_fire(&request, self.clock.now())?;
        let mut pending = self.pending.lock().await;

        let mut updated: Vec<PendingRequest> = pending
            .iter()
            .filter(|p| p.request.identifier != request.identifier)
            .cloned()
            .collect();
        if updated.len() < pending.len() {
            info!("Replacing pending notification '{}'", request.identifier);
        }
        info!(
            "Scheduled notification '{}' for {}",
            request.identifier,
            fire_at.with_timezone(&Local)
        );
        updated.push(PendingRequest { request, fire_at });

        self.persist(&updated)?;
        *pending = updated;
        Ok(())
    }

    async fn pending_requests(&self) -> Result<Vec<PendingRequest>, NotificationError> {
        Ok(self.pending.lock().await.clone())
    }

    async fn remove_pending(&self, identifiers: &[String]) -> Result<(), NotificationError> {
        let mut pending = self.pending.lock().await;
        let updated: Vec<PendingRequest> = pending
            .iter()
            .filter(|p| !identifiers.contains(&p.request.identifier))
            .cloned()
            .collect();

        if updated.len() != pending.len() {
            self.persist(&updated)?;
            *pending = updated;
        }
        Ok(())
    }

    async fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>, NotificationError> {
        let mut pending = self.pending.lock().await;
        if !pending.iter().any(|p| p.fire_at <= now) {
            return Ok(Vec::new());
        }

        let mut delivered = Vec::new();
        let mut updated = Vec::with_capacity(pending.len());

        for entry in pending.iter() {
            if entry.fire_at > now {
                updated.push(entry.clone());
                continue;
            }

            delivered.push(Notification {
                id: Uuid::new_v4(),
                request: entry.request.clone(),
                delivered_at: now,
            });

            if entry.request.trigger.repeats {
                match self.next_fire(&entry.request, now) {
                    Ok(fire_at) => updated.push(PendingRequest {
                        request: entry.request.clone(),
                        fire_at,
                    }),
                    Err(e) => warn!("Dropping repeating notification: {}", e),
                }
            }
        }

        self.persist(&updated)?;
        *pending = updated;
        Ok(delivered)
    }
}
