use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
};
use gallery_core::{
    ImageCreateForm, ImageUpdateForm, NotificationService, UploadedFile,
    domain::validation::{
        self, FILE_REQUIRED, INVALID_IDENTIFIER, Validate, ValidationError,
    },
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Fields of an image upload request, as received.
#[derive(Debug, Default)]
pub struct ImageUpload {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file: Option<UploadedFile>,
}

impl ImageUpload {
    /// Drain a multipart body. Unknown parts are skipped; only the name and
    /// size of the `file` part are kept.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut upload = Self::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("uuid") => upload.uuid = Some(field.text().await?),
                Some("title") => upload.title = Some(field.text().await?),
                Some("description") => upload.description = Some(field.text().await?),
                Some("file") => {
                    let filename = field.file_name().map(str::to_owned);
                    let mut size = 0usize;
                    while let Some(chunk) = field.chunk().await? {
                        size += chunk.len();
                    }
                    upload.file = filename
                        .filter(|name| !name.is_empty())
                        .map(|name| UploadedFile::new(name).with_size(size));
                }
                other => debug!(field = ?other, "ignoring multipart field"),
            }
        }

        Ok(upload)
    }

    pub fn into_create_form(
        self,
    ) -> Result<(UploadedFile, ImageCreateForm), Vec<ValidationError>> {
        let form = ImageCreateForm {
            title: self.title,
            description: self.description,
        };
        let mut violations = form.violations();

        match self.file {
            Some(file) if violations.is_empty() => Ok((file, form)),
            Some(_) => Err(violations),
            None => {
                violations.push(ValidationError::new(FILE_REQUIRED));
                Err(violations)
            }
        }
    }

    pub fn into_update_form(
        self,
    ) -> Result<(UploadedFile, ImageUpdateForm), Vec<ValidationError>> {
        let id = self
            .uuid
            .as_deref()
            .and_then(|raw| raw.trim().parse::<Uuid>().ok());
        let mut violations = Vec::new();
        if id.is_none() {
            violations.push(ValidationError::new(INVALID_IDENTIFIER));
        }
        violations.extend(validation::field_violations(
            self.title.as_deref(),
            self.description.as_deref(),
        ));
        if self.file.is_none() {
            violations.push(ValidationError::new(FILE_REQUIRED));
        }

        match (id, self.file) {
            (Some(id), Some(file)) if violations.is_empty() => Ok((
                file,
                ImageUpdateForm {
                    id,
                    title: self.title,
                    description: self.description,
                },
            )),
            _ => Err(violations),
        }
    }
}

/// Record `violations` in the session and turn them into a 400.
async fn reject(
    violations: Vec<ValidationError>,
    notifications: &NotificationService,
) -> AppError {
    match validation::report(violations, notifications).await {
        Ok(violations) => AppError::validation(violations),
        Err(err) => err.into(),
    }
}

async fn parse_identifier(
    raw: &str,
    notifications: &NotificationService,
) -> AppResult<Uuid> {
    match raw.parse::<Uuid>() {
        Ok(id) => Ok(id),
        Err(_) => {
            let violations = vec![ValidationError::new(INVALID_IDENTIFIER)];
            Err(reject(violations, notifications).await)
        }
    }
}

pub async fn list_images_handler(
    State(state): State<AppState>,
    Extension(notifications): Extension<NotificationService>,
) -> AppResult<Response> {
    let images = state.image_service.list(&notifications).await?;
    Ok(Json(images).into_response())
}

pub async fn get_image_handler(
    State(state): State<AppState>,
    Extension(notifications): Extension<NotificationService>,
    Path(uuid): Path<String>,
) -> AppResult<Response> {
    let id = parse_identifier(&uuid, &notifications).await?;

    match state.image_service.get(id, &notifications).await? {
        Some(image) => Ok(Json(image).into_response()),
        None => Ok(().into_response()),
    }
}

pub async fn create_image_handler(
    State(state): State<AppState>,
    Extension(notifications): Extension<NotificationService>,
    multipart: Multipart,
) -> AppResult<Response> {
    let upload = ImageUpload::from_multipart(multipart).await?;
    let (file, form) = match upload.into_create_form() {
        Ok(parts) => parts,
        Err(violations) => return Err(reject(violations, &notifications).await),
    };

    info!(
        filename = file.original_filename(),
        bytes = file.size(),
        "image upload received"
    );
    let image = state
        .image_service
        .create(&file, form, &notifications)
        .await?;

    Ok(Json(image).into_response())
}

pub async fn update_image_handler(
    State(state): State<AppState>,
    Extension(notifications): Extension<NotificationService>,
    multipart: Multipart,
) -> AppResult<Response> {
    let upload = ImageUpload::from_multipart(multipart).await?;
    let (file, form) = match upload.into_update_form() {
        Ok(parts) => parts,
        Err(violations) => return Err(reject(violations, &notifications).await),
    };

    match state
        .image_service
        .update(&file, form, &notifications)
        .await?
    {
        Some(image) => Ok(Json(image).into_response()),
        None => Ok(().into_response()),
    }
}

pub async fn delete_image_handler(
    State(state): State<AppState>,
    Extension(notifications): Extension<NotificationService>,
    Path(uuid): Path<String>,
) -> AppResult<Response> {
    let id = parse_identifier(&uuid, &notifications).await?;
    state.image_service.delete(id, &notifications).await?;
    Ok(().into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::domain::validation::{DESCRIPTION_TOO_LONG, TITLE_TOO_LONG};

    fn upload() -> ImageUpload {
        ImageUpload {
            uuid: None,
            title: Some("Harbour".into()),
            description: Some("Boats".into()),
            file: Some(UploadedFile::new("harbour.jpg")),
        }
    }

    #[test]
    fn create_form_needs_a_file() {
        let violations = ImageUpload {
            file: None,
            ..upload()
        }
        .into_create_form()
        .unwrap_err();

        assert_eq!(violations, vec![ValidationError::new(FILE_REQUIRED)]);
    }

    #[test]
    fn create_form_reports_every_violation() {
        let violations = ImageUpload {
            title: Some("t".repeat(51)),
            description: Some("d".repeat(301)),
            file: None,
            ..upload()
        }
        .into_create_form()
        .unwrap_err();

        assert_eq!(
            violations,
            vec![
                ValidationError::new(TITLE_TOO_LONG),
                ValidationError::new(DESCRIPTION_TOO_LONG),
                ValidationError::new(FILE_REQUIRED),
            ]
        );
    }

    #[test]
    fn update_form_parses_identifier() {
        let id = Uuid::new_v4();
        let (file, form) = ImageUpload {
            uuid: Some(id.to_string()),
            ..upload()
        }
        .into_update_form()
        .unwrap();

        assert_eq!(form.id, id);
        assert_eq!(file.original_filename(), "harbour.jpg");
    }

    #[test]
    fn update_form_rejects_bad_identifier() {
        let violations = ImageUpload {
            uuid: Some("42".into()),
            ..upload()
        }
        .into_update_form()
        .unwrap_err();

        assert_eq!(violations, vec![ValidationError::new(INVALID_IDENTIFIER)]);
    }
}
