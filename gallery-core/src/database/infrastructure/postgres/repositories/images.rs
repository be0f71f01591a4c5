use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::images::ImageRepository;
use crate::domain::image::{Image, NewImage};
use crate::error::{GalleryError, Result};

const IMAGE_COLUMNS: &str =
    "uuid, title, description, path, date_added, date_updated";

/// [`ImageRepository`](crate::database::ports::images::ImageRepository) over the `images` table.
#[derive(Debug, Clone)]
pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    /// Wrap an existing pool. Migrations must already have run.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Image> {
        let id: Uuid = row
            .try_get("uuid")
            .map_err(|e| GalleryError::Internal(format!("Failed to read image uuid: {e}")))?;
        let title: Option<String> = row
            .try_get("title")
            .map_err(|e| GalleryError::Internal(format!("Failed to read image title: {e}")))?;
        let description: Option<String> = row.try_get("description").map_err(|e| {
            GalleryError::Internal(format!("Failed to read image description: {e}"))
        })?;
        let path: String = row
            .try_get("path")
            .map_err(|e| GalleryError::Internal(format!("Failed to read image path: {e}")))?;
        let created_at: DateTime<Utc> = row
            .try_get("date_added")
            .map_err(|e| GalleryError::Internal(format!("Failed to read date_added: {e}")))?;
        let updated_at: DateTime<Utc> = row
            .try_get("date_updated")
            .map_err(|e| GalleryError::Internal(format!("Failed to read date_updated: {e}")))?;

        Ok(Image {
            id,
            title,
            description,
            path,
            created_at,
            updated_at,
        })
    }
}

/// Translate constraint violations into the port's error vocabulary.
fn map_write_error(context: &str, err: sqlx::Error) -> GalleryError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            // string_data_right_truncation, not_null_violation, check_violation
            Some("22001") | Some("23502") | Some("23514") => {
                return GalleryError::ArgumentRejected(db_err.message().to_string());
            }
            // foreign_key_violation, unique_violation
            Some("23503") | Some("23505") => {
                return GalleryError::IntegrityViolation(db_err.message().to_string());
            }
            _ => {}
        }
    }
    GalleryError::Internal(format!("{context}: {err}"))
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn insert(&self, image: NewImage) -> Result<Image> {
        let sql = format!(
            r#"
            INSERT INTO images (uuid, title, description, path, date_added, date_updated)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {IMAGE_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(image.title)
            .bind(image.description)
            .bind(image.path)
            .bind(image.created_at)
            .bind(image.updated_at)
            .fetch_one(self.pool())
            .await
            .map_err(|e| map_write_error("Failed to insert image", e))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Image>> {
        let sql = format!("SELECT {IMAGE_COLUMNS} FROM images WHERE uuid = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| GalleryError::Internal(format!("Failed to load image: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Image>> {
        let sql = format!(
            "SELECT {IMAGE_COLUMNS} FROM images ORDER BY date_added ASC, uuid ASC"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(|e| GalleryError::Internal(format!("Failed to list images: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(&self, image: &Image) -> Result<Image> {
        let sql = format!(
            r#"
            UPDATE images
            SET title = $2,
                description = $3,
                path = $4,
                date_updated = $5
            WHERE uuid = $1
            RETURNING {IMAGE_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(image.id)
            .bind(image.title.as_deref())
            .bind(image.description.as_deref())
            .bind(image.path.as_str())
            .bind(image.updated_at)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| map_write_error("Failed to update image", e))?
            .ok_or_else(|| {
                GalleryError::ArgumentRejected(format!(
                    "no image with uuid [{}] to update",
                    image.id
                ))
            })?;

        Self::map_row(&row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM images WHERE uuid = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| map_write_error("Failed to delete image", e))?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound(format!(
                "no image with uuid [{id}] exists"
            )));
        }
        Ok(())
    }
}
