use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::domain::notification::SessionId;

/// Key-value scope attached to a client session.
///
/// The lifetime of stored values is owned by the session mechanism behind the
/// adapter; callers never delete keys.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Attribute `key` of `session`, or `None` when unset or expired.
    async fn get(&self, session: SessionId, key: &str) -> Result<Option<Value>>;
    /// Replace attribute `key` of `session`.
    async fn set(&self, session: SessionId, key: &str, value: Value) -> Result<()>;
}
