//! Session-scoped outcome messages.
//!
//! Every operation the gallery performs on behalf of a client may leave one or
//! more [`NotificationMessage`]s behind. They accumulate in the client's
//! session, in generation order, until the session itself goes away; nothing
//! in this crate ever removes them.

use std::{any::type_name_of_val, fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::sessions::SessionStore;
use crate::error::{GalleryError, Result};

/// Session attribute the message sequence is stored under.
pub const NOTIFICATION_SESSION_KEY: &str = "siteNotificationMessages";

/// Opaque identifier of a client session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Severity of a [`NotificationMessage`], serialized as `INFO` or `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationKind {
    /// The operation succeeded.
    Info,
    /// The operation failed or found nothing.
    Error,
}

/// One outcome message. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Human-readable outcome.
    pub text: String,
}

impl NotificationMessage {
    /// Success message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            text: text.into(),
        }
    }

    /// Failure message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            text: text.into(),
        }
    }

    /// Whether this is an [`NotificationKind::Error`].
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Appends outcome messages to one session and reads them back.
///
/// A value of this type is bound to a single session and is meant to be
/// built per request and handed to whatever needs to report outcomes. Appends
/// are read-modify-write against the [`SessionStore`]; callers serialize
/// requests within a session.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn SessionStore>,
    session_id: SessionId,
}

impl fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationService")
            .field("store", &type_name_of_val(self.store.as_ref()))
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl NotificationService {
    /// Channel for `session_id`, backed by `store`.
    pub fn new(store: Arc<dyn SessionStore>, session_id: SessionId) -> Self {
        Self { store, session_id }
    }

    /// Session this channel writes to.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Append one info message.
    pub async fn add_info(&self, text: impl Into<String>) -> Result<()> {
        self.append(vec![NotificationMessage::info(text)]).await
    }

    /// Append one error message.
    pub async fn add_error(&self, text: impl Into<String>) -> Result<()> {
        self.append(vec![NotificationMessage::error(text)]).await
    }

    /// Append every text as an error, keeping their relative order.
    pub async fn add_errors<I, S>(&self, texts: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<_> =
            texts.into_iter().map(NotificationMessage::error).collect();
        if messages.is_empty() {
            return Ok(());
        }
        self.append(messages).await
    }

    /// Everything accumulated in this session so far, oldest first.
    pub async fn snapshot(&self) -> Result<Vec<NotificationMessage>> {
        let stored = self
            .store
            .get(self.session_id, NOTIFICATION_SESSION_KEY)
            .await?;

        match stored {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                GalleryError::Session(format!(
                    "Failed to decode notification messages: {e}"
                ))
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn append(&self, messages: Vec<NotificationMessage>) -> Result<()> {
        let mut current = self.snapshot().await?;
        for message in &messages {
            debug!(
                session = %self.session_id,
                kind = ?message.kind,
                text = %message.text,
                "notification queued"
            );
        }
        current.extend(messages);

        let value = serde_json::to_value(&current)?;
        self.store
            .set(self.session_id, NOTIFICATION_SESSION_KEY, value)
            .await
    }
}
