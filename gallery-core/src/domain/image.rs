use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column limit for [`Image::title`], counted in characters.
pub const TITLE_MAX_CHARS: usize = 50;
/// Column limit for [`Image::description`], counted in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 300;
/// Prefix joined with the uploaded filename to form [`Image::path`].
pub const DEFAULT_STORAGE_PREFIX: &str = "/img/gallery/";

/// A persisted image metadata record.
///
/// `id` is assigned by the store on insert; `path` is derived from the upload
/// and is never empty for a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Serialized as `uuid`.
    #[serde(rename = "uuid")]
    pub id: Uuid,
    /// At most 50 characters.
    pub title: Option<String>,
    /// At most 300 characters.
    pub description: Option<String>,
    /// Storage prefix followed by the uploaded filename.
    pub path: String,
    /// Serialized as `dateAdded`.
    #[serde(rename = "dateAdded")]
    pub created_at: DateTime<Utc>,
    /// Serialized as `dateUpdated`.
    #[serde(rename = "dateUpdated")]
    pub updated_at: DateTime<Utc>,
}

impl Image {
    /// Overwrite the user-editable fields and bump `updated_at`.
    pub fn apply_update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        path: String,
        now: DateTime<Utc>,
    ) {
        self.title = title;
        self.description = description;
        self.path = path;
        self.updated_at = now;
    }
}

/// An image that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// See [`Image::title`].
    pub title: Option<String>,
    /// See [`Image::description`].
    pub description: Option<String>,
    /// See [`Image::path`].
    pub path: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` until the first update.
    pub updated_at: DateTime<Utc>,
}

impl NewImage {
    /// Record stamped with the current time.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        path: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            title,
            description,
            path,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the identity handed out by the store.
    pub fn into_image(self, id: Uuid) -> Image {
        Image {
            id,
            title: self.title,
            description: self.description,
            path: self.path,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Handle for a file received by the upload transport.
///
/// Only the declared filename matters to the core; contents are neither
/// inspected nor stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    original_filename: String,
    size: usize,
}

impl UploadedFile {
    /// Handle for an upload named `original_filename`.
    pub fn new(original_filename: impl Into<String>) -> Self {
        Self {
            original_filename: original_filename.into(),
            size: 0,
        }
    }

    /// Record the number of bytes received.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Filename as sent by the client.
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// Bytes received for the upload.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Storage location for this upload under `prefix`. No sanitization is
    /// applied; the transport owns filename hygiene.
    pub fn storage_path(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.original_filename)
    }
}

/// Fields accepted when creating an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageCreateForm {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Fields accepted when updating an image, including its identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageUpdateForm {
    /// Image to update, sent as `uuid`.
    #[serde(rename = "uuid")]
    pub id: Uuid,
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}
