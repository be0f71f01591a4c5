use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use crate::domain::image::{Image, NewImage};

/// Repository port for image metadata persistence.
///
/// Adapters report constraint failures as
/// [`GalleryError::ArgumentRejected`](crate::GalleryError::ArgumentRejected)
/// and a delete of an unknown id as
/// [`GalleryError::NotFound`](crate::GalleryError::NotFound).
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Store a new record and return it with its assigned identity.
    async fn insert(&self, image: NewImage) -> Result<Image>;
    /// Record with `id`, if any.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Image>>;
    /// All records in the store's iteration order.
    async fn find_all(&self) -> Result<Vec<Image>>;
    /// Overwrite the stored record carrying `image.id`.
    async fn update(&self, image: &Image) -> Result<Image>;
    /// Remove the record with `id`. An unknown id is an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}
