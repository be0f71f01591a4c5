//! Form constraint checks whose violations double as notifications.

use serde::Serialize;

use crate::domain::image::{
    DESCRIPTION_MAX_CHARS, ImageCreateForm, ImageUpdateForm, TITLE_MAX_CHARS,
};
use crate::domain::notification::NotificationService;
use crate::error::Result;

/// Title longer than the column allows.
pub const TITLE_TOO_LONG: &str =
    "Image title's maximum size should be 50 characters";
/// Description longer than the column allows.
pub const DESCRIPTION_TOO_LONG: &str =
    "Description's maximum size should be 300 characters";
/// Upload without a `file` part.
pub const FILE_REQUIRED: &str = "Image file is required";
/// Missing or malformed image uuid.
pub const INVALID_IDENTIFIER: &str = "Image uuid must be a valid identifier";

/// A single failed constraint, in the shape returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationError {
    /// Text also recorded as an error notification.
    pub message: String,
}

impl ValidationError {
    /// Violation carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Field-level checks. Implementations report every violation, never just
/// the first.
pub trait Validate {
    fn violations(&self) -> Vec<ValidationError>;
}

/// Title and description limits shared by every form carrying them.
pub fn field_violations(
    title: Option<&str>,
    description: Option<&str>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if exceeds(title, TITLE_MAX_CHARS) {
        errors.push(ValidationError::new(TITLE_TOO_LONG));
    }
    if exceeds(description, DESCRIPTION_MAX_CHARS) {
        errors.push(ValidationError::new(DESCRIPTION_TOO_LONG));
    }
    errors
}

fn exceeds(value: Option<&str>, max_chars: usize) -> bool {
    value.is_some_and(|v| v.chars().count() > max_chars)
}

impl Validate for ImageCreateForm {
    fn violations(&self) -> Vec<ValidationError> {
        field_violations(self.title.as_deref(), self.description.as_deref())
    }
}

impl Validate for ImageUpdateForm {
    fn violations(&self) -> Vec<ValidationError> {
        field_violations(self.title.as_deref(), self.description.as_deref())
    }
}

/// Record `errors` as error notifications and hand them back.
///
/// Used for violations found outside [`Validate`] as well, e.g. a multipart
/// request without a file part.
pub async fn report(
    errors: Vec<ValidationError>,
    notifications: &NotificationService,
) -> Result<Vec<ValidationError>> {
    notifications
        .add_errors(errors.iter().map(|e| e.message.clone()))
        .await?;
    Ok(errors)
}

/// Run every check on `form`. An empty result means the form may be passed
/// on to the image service; otherwise each violation has already been
/// appended to `notifications`.
pub async fn validate<F: Validate>(
    form: &F,
    notifications: &NotificationService,
) -> Result<Vec<ValidationError>> {
    report(form.violations(), notifications).await
}
