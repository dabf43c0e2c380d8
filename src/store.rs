//! In-memory session storage that forgets expired sessions.
//!
//! Sessions hold staged images, so records must be dropped once they expire
//! rather than only hidden from `load`. [`sweep_expired`] runs the periodic
//! cleanup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};
use tracing::{debug, error};

/// Session records keyed by id, shared between the session layer and the sweeper.
#[derive(Clone, Debug, Default)]
pub struct SessionMemory(Arc<Mutex<HashMap<Id, Record>>>);

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

impl SessionMemory {
    /// Number of records held, expired or not.
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    /// True when no records are held.
    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for SessionMemory {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut records = self.0.lock().await;
        match records.get(session_id).map(is_active) {
            Some(true) => Ok(records.get(session_id).cloned()),
            Some(false) => {
                records.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionMemory {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        let before = records.len();
        records.retain(|_, record| is_active(record));
        let removed = before - records.len();
        if removed > 0 {
            debug!("Dropped {} expired sessions", removed);
        }
        Ok(())
    }
}

/// Deletes expired sessions every `period`, forever.
pub async fn sweep_expired(store: SessionMemory, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if let Err(err) = store.delete_expired().await {
            error!("Failed to delete expired sessions: {}", err);
        }
    }
}
