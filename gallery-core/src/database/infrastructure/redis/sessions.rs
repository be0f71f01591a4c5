use std::fmt;
use std::time::Duration;

use ::redis::{AsyncCommands, aio::ConnectionManager};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::database::ports::sessions::SessionStore;
use crate::domain::notification::SessionId;
use crate::error::{GalleryError, Result};

/// Session attributes kept in Redis so every server instance sees the same
/// session. Each write refreshes the key's expiry to the configured TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl: Duration,
}

impl fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("connection", &"ConnectionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl RedisSessionStore {
    /// Connect to `redis_url`. Keys written through this store expire after `ttl`.
    pub async fn new(redis_url: &str, ttl: Duration) -> Result<Self> {
        info!("Connecting to Redis session store at {}", redis_url);

        let client = ::redis::Client::open(redis_url).map_err(|e| {
            GalleryError::Session(format!("Failed to create Redis client: {e}"))
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            GalleryError::Session(format!("Failed to connect to Redis: {e}"))
        })?;

        info!("Successfully connected to Redis session store");

        Ok(Self { conn, ttl })
    }

    fn key(session: SessionId, key: &str) -> String {
        format!("gallery:session:{session}:{key}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, session: SessionId, key: &str) -> Result<Option<Value>> {
        let redis_key = Self::key(session, key);
        debug!("Session GET: {}", redis_key);

        let mut conn = self.conn.clone();
        let data: Option<String> = conn
            .get(&redis_key)
            .await
            .map_err(|e| GalleryError::Session(format!("Redis GET failed: {e}")))?;

        data.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| {
                GalleryError::Session(format!("Failed to deserialize session data: {e}"))
            })
    }

    async fn set(&self, session: SessionId, key: &str, value: Value) -> Result<()> {
        let redis_key = Self::key(session, key);
        debug!("Session SET: {} (TTL: {:?})", redis_key, self.ttl);

        let json = serde_json::to_string(&value)?;
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(&redis_key, json, self.ttl.as_secs().max(1))
            .await
            .map_err(|e| GalleryError::Session(format!("Redis SETEX failed: {e}")))?;

        Ok(())
    }
}
