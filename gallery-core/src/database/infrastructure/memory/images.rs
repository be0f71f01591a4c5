use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::images::ImageRepository;
use crate::domain::image::{
    DESCRIPTION_MAX_CHARS, Image, NewImage, TITLE_MAX_CHARS,
};
use crate::error::{GalleryError, Result};

/// Image store kept in process memory.
///
/// Records are returned in insertion order. The same column constraints the
/// SQL schema declares are enforced here so both adapters reject the same
/// input.
#[derive(Debug, Default)]
pub struct InMemoryImageRepository {
    images: RwLock<Vec<Image>>,
}

impl InMemoryImageRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_images(images: Vec<Image>) -> Self {
        Self {
            images: RwLock::new(images),
        }
    }

    /// Number of stored images.
    pub async fn len(&self) -> usize {
        self.images.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.images.read().await.is_empty()
    }
}

fn check_columns(
    title: Option<&str>,
    description: Option<&str>,
    path: &str,
) -> Result<()> {
    if path.is_empty() {
        return Err(GalleryError::ArgumentRejected(
            "path must not be empty".into(),
        ));
    }
    if title.is_some_and(|t| t.chars().count() > TITLE_MAX_CHARS) {
        return Err(GalleryError::ArgumentRejected(format!(
            "title exceeds {TITLE_MAX_CHARS} characters"
        )));
    }
    if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS) {
        return Err(GalleryError::ArgumentRejected(format!(
            "description exceeds {DESCRIPTION_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn insert(&self, image: NewImage) -> Result<Image> {
        check_columns(
            image.title.as_deref(),
            image.description.as_deref(),
            &image.path,
        )?;

        let stored = image.into_image(Uuid::new_v4());
        self.images.write().await.push(stored.clone());
        debug!(image_id = %stored.id, "image inserted");
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Image>> {
        let images = self.images.read().await;
        Ok(images.iter().find(|image| image.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Image>> {
        Ok(self.images.read().await.clone())
    }

    async fn update(&self, image: &Image) -> Result<Image> {
        check_columns(
            image.title.as_deref(),
            image.description.as_deref(),
            &image.path,
        )?;

        let mut images = self.images.write().await;
        let slot = images
            .iter_mut()
            .find(|existing| existing.id == image.id)
            .ok_or_else(|| {
                GalleryError::ArgumentRejected(format!(
                    "no image with uuid [{}] to update",
                    image.id
                ))
            })?;
        *slot = image.clone();
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut images = self.images.write().await;
        let position = images
            .iter()
            .position(|image| image.id == id)
            .ok_or_else(|| {
                GalleryError::NotFound(format!("no image with uuid [{id}] exists"))
            })?;
        images.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_image(path: &str) -> NewImage {
        NewImage::new(Some("title".into()), None, path.into())
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_keeps_order() {
        let repo = InMemoryImageRepository::new();
        let first = repo.insert(new_image("/a")).await.unwrap();
        let second = repo.insert(new_image("/b")).await.unwrap();

        assert_ne!(first.id, second.id);
        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn insert_rejects_empty_path() {
        let repo = InMemoryImageRepository::new();
        let err = repo.insert(new_image("")).await.unwrap_err();

        assert!(matches!(err, GalleryError::ArgumentRejected(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn insert_rejects_oversized_title() {
        let repo = InMemoryImageRepository::new();
        let image = NewImage::new(Some("x".repeat(51)), None, "/a".into());

        let err = repo.insert(image).await.unwrap_err();
        assert!(matches!(err, GalleryError::ArgumentRejected(_)));
    }

    #[tokio::test]
    async fn update_overwrites_in_place() {
        let repo = InMemoryImageRepository::new();
        let mut image = repo.insert(new_image("/a")).await.unwrap();
        image.path = "/b".into();

        let updated = repo.update(&image).await.unwrap();

        assert_eq!(updated.path, "/b");
        assert_eq!(repo.find_by_id(image.id).await.unwrap(), Some(updated));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let repo = InMemoryImageRepository::new();
        let err = repo.delete_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, GalleryError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = InMemoryImageRepository::new();
        let image = repo.insert(new_image("/a")).await.unwrap();

        repo.delete_by_id(image.id).await.unwrap();

        assert_eq!(repo.find_by_id(image.id).await.unwrap(), None);
    }
}
