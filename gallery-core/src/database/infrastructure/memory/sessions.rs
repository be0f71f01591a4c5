use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use crate::Result;
use crate::database::ports::sessions::SessionStore;
use crate::domain::notification::SessionId;

/// Idle time after which an untouched session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct SessionEntry {
    attributes: HashMap<String, Value>,
    touched: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched.elapsed() >= ttl
    }
}

/// Session attributes held in process memory.
///
/// Like the Redis store, a session expires `ttl` after its last write.
/// Expired sessions read back empty and are swept on the next write.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl InMemorySessionStore {
    /// Store with [`DEFAULT_SESSION_TTL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions expire `ttl` after their last write.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Number of sessions currently held, expired or not.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn sweep_expired(&self) {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired(self.ttl));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(removed, "expired in-memory sessions");
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session: SessionId, key: &str) -> Result<Option<Value>> {
        let expired = match self.sessions.get(&session) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                return Ok(entry.attributes.get(key).cloned());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.sessions
                .remove_if(&session, |_, entry| entry.is_expired(self.ttl));
        }
        Ok(None)
    }

    async fn set(&self, session: SessionId, key: &str, value: Value) -> Result<()> {
        // retain locks every shard, so it must not run while an entry guard is held
        self.sweep_expired();

        let mut entry = self.sessions.entry(session).or_insert_with(|| SessionEntry {
            attributes: HashMap::new(),
            touched: Instant::now(),
        });
        entry.attributes.insert(key.to_string(), value);
        entry.touched = Instant::now();
        Ok(())
    }
}
