//! # Reminder Store
//!
//! sqlite-backed list of reminders with an in-memory view sorted by timestamp.
//!
//! Every mutation runs in its own transaction. The view is only touched
//! after `COMMIT` succeeds, so a failed write leaves both the file and the
//! view exactly as they were. Subscribers get a [`StoreEvent`] per committed
//! change.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::Clock;
use crate::features::reminders::model::{Reminder, ReminderId};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use sqlite::{Connection, State};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the change channel; slow subscribers see `Lagged` and reload
const EVENT_CAPACITY: usize = 64;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS reminders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp_us INTEGER NOT NULL,
        is_checked INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_reminders_timestamp ON reminders(timestamp_us, id);
";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlite::Error),

    #[error("Reminder not found: {0}")]
    NotFound(ReminderId),

    #[error("Corrupt row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

/// Committed change, emitted after the view has been updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(Reminder),
    Updated(Reminder),
    Deleted(ReminderId),
}

pub struct ReminderStore {
    connection: Connection,
    clock: Arc<dyn Clock>,
    /// Sorted by `Reminder::sort_key`
    reminders: Vec<Reminder>,
    events: broadcast::Sender<StoreEvent>,
}

impl ReminderStore {
    /// Open (or create) the database file and load the sorted view
    pub fn open(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        info!("Opening reminder store at {}", path.display());
        let connection = sqlite::open(path)?;
        Self::with_connection(connection, clock)
    }

    /// Volatile store, mainly for tests and previews
    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let connection = sqlite::open(":memory:")?;
        Self::with_connection(connection, clock)
    }

    fn with_connection(connection: Connection, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        connection.execute(SCHEMA)?;
        let reminders = load_rows(&connection)?;
        debug!("Loaded {} reminders", reminders.len());

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(ReminderStore {
            connection,
            clock,
            reminders,
            events,
        })
    }

    /// Sorted view, oldest first
    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn get(&self, id: ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Receive an event for every committed change
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Record a new unchecked reminder stamped with the current time
    pub fn create(&mut self) -> Result<Reminder, StoreError> {
        let timestamp_us = self.clock.now().timestamp_micros();
        let timestamp = from_micros(0, timestamp_us)?;

        let id = self.transaction(|conn| {
            let mut insert =
                conn.prepare("INSERT INTO reminders (timestamp_us, is_checked) VALUES (?, 0)")?;
            insert.bind((1, timestamp_us))?;
            insert.next()?;

            let mut rowid = conn.prepare("SELECT last_insert_rowid()")?;
            rowid.next()?;
            rowid.read::<i64, _>(0)
        })?;

        let reminder = Reminder {
            id: ReminderId(id),
            timestamp,
            is_checked: false,
        };

        let key = reminder.sort_key();
        let pos = self.reminders.partition_point(|r| r.sort_key() <= key);
        self.reminders.insert(pos, reminder.clone());

        info!("Created reminder {} at {}", reminder.id, reminder.timestamp);
        self.emit(StoreEvent::Created(reminder.clone()));
        Ok(reminder)
    }

    /// Set the checked flag of one reminder
    pub fn set_checked(&mut self, id: ReminderId, value: bool) -> Result<Reminder, StoreError> {
        let index = self.index_of(id)?;

        let changed = self.transaction(|conn| {
            let mut update = conn.prepare("UPDATE reminders SET is_checked = ? WHERE id = ?")?;
            update.bind((1, value as i64))?;
            update.bind((2, id.0))?;
            update.next()?;
            Ok(conn.change_count())
        })?;

        if changed == 0 {
            warn!("Reminder {} vanished from the database, reloading view", id);
            self.reload()?;
            return Err(StoreError::NotFound(id));
        }

        self.reminders[index].is_checked = value;
        let reminder = self.reminders[index].clone();

        debug!("Reminder {} checked = {}", id, value);
        self.emit(StoreEvent::Updated(reminder.clone()));
        Ok(reminder)
    }

    /// Flip the checked flag
    pub fn toggle(&mut self, id: ReminderId) -> Result<Reminder, StoreError> {
        let current = self
            .get(id)
            .map(|r| r.is_checked)
            .ok_or(StoreError::NotFound(id))?;
        self.set_checked(id, !current)
    }

    /// Remove one reminder
    pub fn delete(&mut self, id: ReminderId) -> Result<Reminder, StoreError> {
        let index = self.index_of(id)?;

        let changed = self.transaction(|conn| {
            let mut delete = conn.prepare("DELETE FROM reminders WHERE id = ?")?;
            delete.bind((1, id.0))?;
            delete.next()?;
            Ok(conn.change_count())
        })?;

        if changed == 0 {
            warn!("Reminder {} vanished from the database, reloading view", id);
            self.reload()?;
            return Err(StoreError::NotFound(id));
        }

        let removed = self.reminders.remove(index);

        info!("Deleted reminder {}", id);
        self.emit(StoreEvent::Deleted(id));
        Ok(removed)
    }

    /// Replace the view with what is on disk
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.reminders = load_rows(&self.connection)?;
        Ok(())
    }

    fn index_of(&self, id: ReminderId) -> Result<usize, StoreError> {
        self.reminders
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Run `f` inside BEGIN/COMMIT, rolling back on any failure
    fn transaction<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, sqlite::Error>,
    {
        self.connection.execute("BEGIN IMMEDIATE")?;

        let result = f(&self.connection).and_then(|value| {
            self.connection.execute("COMMIT")?;
            Ok(value)
        });

        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Commit failed, rolling back: {}", e);
                if let Err(rollback) = self.connection.execute("ROLLBACK") {
                    warn!("Rollback failed: {}", rollback);
                }
                Err(StoreError::Database(e))
            }
        }
    }
}

fn load_rows(connection: &Connection) -> Result<Vec<Reminder>, StoreError> {
    let mut statement = connection
        .prepare("SELECT id, timestamp_us, is_checked FROM reminders ORDER BY timestamp_us, id")?;

    let mut reminders = Vec::new();
    while let State::Row = statement.next()? {
        let id = statement.read::<i64, _>(0)?;
        let timestamp_us = statement.read::<i64, _>(1)?;
        let is_checked = statement.read::<i64, _>(2)? != 0;

        reminders.push(Reminder {
            id: ReminderId(id),
            timestamp: from_micros(id, timestamp_us)?,
            is_checked,
        });
    }
    Ok(reminders)
}

fn from_micros(id: i64, micros: i64) -> Result<DateTime<Utc>, StoreError> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).ok_or_else(|| StoreError::Corrupt {
        id,
        reason: format!("timestamp {} out of range", micros),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 9, h, m, 0).unwrap()
    }

    fn memory_store(start: DateTime<Utc>) -> (ReminderStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(start));
        let store = ReminderStore::open_in_memory(clock.clone()).unwrap();
        (store, clock)
    }

    fn temp_db() -> PathBuf {
        std::env::temp_dir().join(format!("hydrominder-test-{}.db", uuid::Uuid::new_v4()))
    }

    fn summary(store: &ReminderStore) -> Vec<(DateTime<Utc>, bool)> {
        store.list().iter().map(|r| (r.timestamp, r.is_checked)).collect()
    }

    #[test]
    fn test_create_stamps_clock_reading_unchecked() {
        let (mut store, _clock) = memory_store(at(8, 0));

        let reminder = store.create().unwrap();

        assert_eq!(reminder.timestamp, at(8, 0));
        assert!(!reminder.is_checked);
        assert_eq!(store.list(), &[reminder]);
    }

    #[test]
    fn test_list_sorted_even_when_clock_goes_backwards() {
        let (mut store, clock) = memory_store(at(12, 0));

        for (h, m) in [(12, 0), (9, 15), (23, 59), (0, 1), (9, 15), (18, 30)] {
            clock.set(at(h, m));
            store.create().unwrap();
        }

        let list = store.list();
        assert_eq!(list.len(), 6);
        assert!(list.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));
        assert_eq!(list.first().unwrap().timestamp, at(0, 1));
        assert_eq!(list.last().unwrap().timestamp, at(23, 59));
    }

    #[test]
    fn test_walkthrough_create_toggle_delete() {
        let (mut store, clock) = memory_store(at(8, 0));

        let first = store.create().unwrap();
        assert_eq!(summary(&store), vec![(at(8, 0), false)]);

        clock.set(at(19, 30));
        let second = store.create().unwrap();
        assert_eq!(summary(&store), vec![(at(8, 0), false), (at(19, 30), false)]);

        store.toggle(first.id).unwrap();
        assert_eq!(summary(&store), vec![(at(8, 0), true), (at(19, 30), false)]);

        store.delete(second.id).unwrap();
        assert_eq!(summary(&store), vec![(at(8, 0), true)]);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (mut store, clock) = memory_store(at(7, 0));
        let mut ids = Vec::new();
        for h in 7..12 {
            clock.set(at(h, 0));
            ids.push(store.create().unwrap().id);
        }
        store.set_checked(ids[1], true).unwrap();
        store.set_checked(ids[3], true).unwrap();
        let before: Vec<Reminder> = store.list().to_vec();

        let removed = store.delete(ids[2]).unwrap();

        let expected: Vec<Reminder> = before.into_iter().filter(|r| r.id != ids[2]).collect();
        assert_eq!(removed.id, ids[2]);
        assert_eq!(store.list(), expected.as_slice());
    }

    #[test]
    fn test_toggle_survives_restart() {
        let path = temp_db();
        let clock = Arc::new(FixedClock::new(at(8, 0)));

        let id = {
            let mut store = ReminderStore::open(&path, clock.clone()).unwrap();
            let reminder = store.create().unwrap();
            store.set_checked(reminder.id, true).unwrap();
            reminder.id
        };

        let reopened = ReminderStore::open(&path, clock).unwrap();
        let reminder = reopened.get(id).unwrap();
        assert!(reminder.is_checked);
        assert_eq!(reminder.timestamp, at(8, 0));

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_reload_picks_up_rows_written_elsewhere() {
        let (mut store, _clock) = memory_store(at(8, 0));
        store.create().unwrap();
        store
            .connection
            .execute(format!(
                "INSERT INTO reminders (timestamp_us, is_checked) VALUES ({}, 1)",
                at(6, 0).timestamp_micros()
            ))
            .unwrap();
        assert_eq!(store.len(), 1);

        store.reload().unwrap();

        assert_eq!(summary(&store), vec![(at(6, 0), true), (at(8, 0), false)]);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let (mut store, _clock) = memory_store(at(8, 0));
        let ghost = ReminderId(42);

        assert!(matches!(store.toggle(ghost), Err(StoreError::NotFound(_))));
        assert!(matches!(store.set_checked(ghost, true), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(ghost), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_failed_create_leaves_view_and_disk_alone() {
        let (mut store, _clock) = memory_store(at(8, 0));
        store.create().unwrap();
        store
            .connection
            .execute(
                "CREATE TRIGGER reject_insert BEFORE INSERT ON reminders
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .unwrap();
        let before = store.list().to_vec();

        assert!(matches!(store.create(), Err(StoreError::Database(_))));

        assert_eq!(store.list(), before.as_slice());
        assert_eq!(load_rows(&store.connection).unwrap(), before);
    }

    #[test]
    fn test_failed_delete_keeps_record() {
        let (mut store, _clock) = memory_store(at(8, 0));
        let reminder = store.create().unwrap();
        store
            .connection
            .execute(
                "CREATE TRIGGER reject_delete BEFORE DELETE ON reminders
                 BEGIN SELECT RAISE(ABORT, 'read only'); END;",
            )
            .unwrap();

        assert!(store.delete(reminder.id).is_err());

        assert_eq!(store.list(), &[reminder.clone()]);
        assert_eq!(load_rows(&store.connection).unwrap(), vec![reminder]);
    }

    #[test]
    fn test_failed_set_checked_keeps_old_value() {
        let (mut store, _clock) = memory_store(at(8, 0));
        let reminder = store.create().unwrap();
        let mut rx = store.subscribe();
        store
            .connection
            .execute(
                "CREATE TRIGGER reject_update BEFORE UPDATE ON reminders
                 BEGIN SELECT RAISE(ABORT, 'read only'); END;",
            )
            .unwrap();

        assert!(matches!(store.set_checked(reminder.id, true), Err(StoreError::Database(_))));
        assert!(store.toggle(reminder.id).is_err());

        assert!(!store.get(reminder.id).unwrap().is_checked);
        assert_eq!(store.list(), &[reminder.clone()]);
        assert_eq!(load_rows(&store.connection).unwrap(), vec![reminder]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_subscribers_see_committed_changes() {
        let (mut store, _clock) = memory_store(at(8, 0));
        let mut rx = store.subscribe();

        let reminder = store.create().unwrap();
        let toggled = store.toggle(reminder.id).unwrap();
        store.delete(reminder.id).unwrap();

        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Created(reminder.clone()));
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Updated(toggled));
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::Deleted(reminder.id));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_failed_commit_emits_nothing() {
        let (mut store, _clock) = memory_store(at(8, 0));
        let mut rx = store.subscribe();
        store
            .connection
            .execute(
                "CREATE TRIGGER reject_insert BEFORE INSERT ON reminders
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .unwrap();

        assert!(store.create().is_err());
        assert!(rx.try_recv().is_err());
    }
}
