use std::{any::type_name_of_val, fmt, sync::Arc};

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::ports::images::ImageRepository;
use crate::domain::image::{
    DEFAULT_STORAGE_PREFIX, Image, ImageCreateForm, ImageUpdateForm, NewImage,
    UploadedFile,
};
use crate::domain::notification::NotificationService;
use crate::error::GalleryError;

/// Error left by listing an empty store.
pub const NO_IMAGES_FOUND: &str = "No images found";
/// Info left by a successful create.
pub const IMAGE_CREATED: &str = "Image has been created successfully";
/// Info left by a successful update.
pub const IMAGE_UPDATED: &str = "Image updated successfully";
/// Error left by updating an unknown image.
pub const IMAGE_NOT_IN_DATABASE: &str = "Image has not been found in database";

/// Drives the image lifecycle against the store and reports every outcome
/// to the caller's [`NotificationService`].
///
/// Not-found is an ordinary outcome (`Ok(None)` plus an error notification).
/// A write the store rejects fails with
/// [`ImageServiceError::DatabaseOperation`] after the reason has been
/// recorded as a notification.
pub struct ImageService<R>
where
    R: ImageRepository + ?Sized,
{
    repository: Arc<R>,
    storage_prefix: String,
}

impl<R> Clone for ImageService<R>
where
    R: ImageRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            storage_prefix: self.storage_prefix.clone(),
        }
    }
}

impl<R> fmt::Debug for ImageService<R>
where
    R: ImageRepository + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageService")
            .field("repository", &type_name_of_val(self.repository.as_ref()))
            .field("storage_prefix", &self.storage_prefix)
            .finish()
    }
}

impl<R> ImageService<R>
where
    R: ImageRepository + ?Sized,
{
    /// Service storing uploads under the default prefix.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
        }
    }

    /// Override the prefix uploaded filenames are stored under.
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    /// Prefix prepended to uploaded filenames.
    pub fn storage_prefix(&self) -> &str {
        &self.storage_prefix
    }

    /// All stored images. An empty store is a valid result but still leaves
    /// a "No images found" error notification.
    pub async fn list(
        &self,
        notifications: &NotificationService,
    ) -> Result<Vec<Image>, ImageServiceError> {
        let images = self.repository.find_all().await?;

        if images.is_empty() {
            notifications.add_error(NO_IMAGES_FOUND).await?;
        }

        Ok(images)
    }

    /// Store a new image for `file`. A rejection by the store is reported and
    /// returned as [`ImageServiceError::DatabaseOperation`].
    pub async fn create(
        &self,
        file: &UploadedFile,
        form: ImageCreateForm,
        notifications: &NotificationService,
    ) -> Result<Image, ImageServiceError> {
        let path = file.storage_path(&self.storage_prefix);
        let image = NewImage::new(form.title, form.description, path);

        match self.repository.insert(image).await {
            Ok(created) => {
                info!(image_id = %created.id, path = %created.path, "image created");
                notifications.add_info(IMAGE_CREATED).await?;
                Ok(created)
            }
            Err(GalleryError::ArgumentRejected(reason)) => {
                warn!(%reason, "store rejected new image");
                notifications
                    .add_error(format!(
                        "Database operation failed with message: {reason}"
                    ))
                    .await?;
                Err(ImageServiceError::DatabaseOperation {
                    source: GalleryError::ArgumentRejected(reason),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite title, description and path of the image `form.id` names.
    /// Returns `Ok(None)` when no such image exists; the store is left
    /// untouched in that case.
    pub async fn update(
        &self,
        file: &UploadedFile,
        form: ImageUpdateForm,
        notifications: &NotificationService,
    ) -> Result<Option<Image>, ImageServiceError> {
        let Some(mut image) = self.repository.find_by_id(form.id).await? else {
            notifications.add_error(IMAGE_NOT_IN_DATABASE).await?;
            return Ok(None);
        };

        let path = file.storage_path(&self.storage_prefix);
        image.apply_update(form.title, form.description, path, Utc::now());

        match self.repository.update(&image).await {
            Ok(updated) => {
                info!(image_id = %updated.id, path = %updated.path, "image updated");
                notifications.add_info(IMAGE_UPDATED).await?;
                Ok(Some(updated))
            }
            Err(GalleryError::ArgumentRejected(reason)) => {
                warn!(image_id = %image.id, %reason, "store rejected image update");
                notifications
                    .add_error(format!("Error occurred: {reason}"))
                    .await?;
                Err(ImageServiceError::DatabaseOperation {
                    source: GalleryError::ArgumentRejected(reason),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Image with `id`, or `None` plus an error notification.
    pub async fn get(
        &self,
        id: Uuid,
        notifications: &NotificationService,
    ) -> Result<Option<Image>, ImageServiceError> {
        let image = self.repository.find_by_id(id).await?;

        if image.is_none() {
            notifications
                .add_error(format!("Image with uuid [{id}] is not found"))
                .await?;
        }

        Ok(image)
    }

    /// Delete the image `id` names. Every store failure, including an
    /// unknown id, is reported and then raised.
    pub async fn delete(
        &self,
        id: Uuid,
        notifications: &NotificationService,
    ) -> Result<(), ImageServiceError> {
        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                info!(image_id = %id, "image deleted");
                notifications
                    .add_info(format!(
                        "Successfully deleted an image with uuid [{id}]"
                    ))
                    .await?;
                Ok(())
            }
            Err(source) => {
                warn!(image_id = %id, error = %source, "image delete failed");
                notifications
                    .add_error(format!(
                        "Image with uuid [{id}] can not be deleted: {source}"
                    ))
                    .await?;
                Err(ImageServiceError::DatabaseOperation { source })
            }
        }
    }
}

/// Failures of [`ImageService`] operations.
#[derive(Debug, Error)]
pub enum ImageServiceError {
    /// The store refused the operation. The reason has already been written
    /// to the session's notifications.
    #[error("Database operation failed")]
    DatabaseOperation {
        #[source]
        source: GalleryError,
    },
    /// Any other store or session failure.
    #[error(transparent)]
    Storage(#[from] GalleryError),
}
