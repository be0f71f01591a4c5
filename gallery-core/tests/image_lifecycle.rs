//! End-to-end behaviour of the image lifecycle against the in-memory adapters,
//! checking what ends up in the store and in the session's notifications.

use std::sync::Arc;

use anyhow::Result;
use gallery_core::{
    ImageCreateForm, ImageService, ImageServiceError, ImageUpdateForm,
    NotificationKind, NotificationMessage, NotificationService, SessionId,
    UploadedFile,
    database::infrastructure::memory::{InMemoryImageRepository, InMemorySessionStore},
    database::ports::images::ImageRepository,
    domain::{
        image_service::{IMAGE_CREATED, NO_IMAGES_FOUND},
        validation::{self, DESCRIPTION_TOO_LONG, TITLE_TOO_LONG},
    },
};
use uuid::Uuid;

struct Harness {
    repository: Arc<InMemoryImageRepository>,
    sessions: Arc<InMemorySessionStore>,
    service: ImageService<InMemoryImageRepository>,
}

impl Harness {
    fn new() -> Self {
        let repository = Arc::new(InMemoryImageRepository::new());
        Self {
            service: ImageService::new(repository.clone()),
            repository,
            sessions: Arc::new(InMemorySessionStore::new()),
        }
    }

    fn session(&self, id: SessionId) -> NotificationService {
        NotificationService::new(self.sessions.clone(), id)
    }
}

fn form(title: &str, description: &str) -> ImageCreateForm {
    ImageCreateForm {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
    }
}

#[tokio::test]
async fn messages_accumulate_across_requests_in_one_session() -> Result<()> {
    let harness = Harness::new();
    let session_id = SessionId::new();

    // request one: empty gallery
    harness.service.list(&harness.session(session_id)).await?;

    // request two: upload
    let created = harness
        .service
        .create(
            &UploadedFile::new("pier.png"),
            form("Pier", "at dusk"),
            &harness.session(session_id),
        )
        .await?;

    // request three: lookup of something else
    let missing = Uuid::new_v4();
    harness
        .service
        .get(missing, &harness.session(session_id))
        .await?;

    let snapshot = harness.session(session_id).snapshot().await?;
    assert_eq!(
        snapshot,
        vec![
            NotificationMessage::error(NO_IMAGES_FOUND),
            NotificationMessage::info(IMAGE_CREATED),
            NotificationMessage::error(format!(
                "Image with uuid [{missing}] is not found"
            )),
        ]
    );
    assert_eq!(harness.repository.find_all().await?, vec![created]);
    Ok(())
}

#[tokio::test]
async fn other_sessions_never_see_foreign_messages() -> Result<()> {
    let harness = Harness::new();
    let uploader = SessionId::new();
    let viewer = SessionId::new();

    harness
        .service
        .create(
            &UploadedFile::new("a.png"),
            form("a", "b"),
            &harness.session(uploader),
        )
        .await?;
    let images = harness.service.list(&harness.session(viewer)).await?;

    assert_eq!(images.len(), 1);
    assert!(harness.session(viewer).snapshot().await?.is_empty());
    assert_eq!(harness.session(uploader).snapshot().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn rejected_form_never_reaches_the_store() -> Result<()> {
    let harness = Harness::new();
    let notifications = harness.session(SessionId::new());
    let oversized = form(&"t".repeat(51), &"d".repeat(301));

    let errors = validation::validate(&oversized, &notifications).await?;

    assert_eq!(errors.len(), 2);
    assert!(harness.repository.is_empty().await);

    let snapshot = notifications.snapshot().await?;
    assert!(snapshot.iter().all(|m| m.kind == NotificationKind::Error));
    let texts: Vec<_> = snapshot.iter().map(|m| m.text.as_str()).collect();
    assert!(texts.contains(&TITLE_TOO_LONG));
    assert!(texts.contains(&DESCRIPTION_TOO_LONG));
    Ok(())
}

#[tokio::test]
async fn full_lifecycle_leaves_one_message_per_step() -> Result<()> {
    let harness = Harness::new();
    let notifications = harness.session(SessionId::new());

    let created = harness
        .service
        .create(&UploadedFile::new("one.png"), form("one", "first"), &notifications)
        .await?;
    let updated = harness
        .service
        .update(
            &UploadedFile::new("two.png"),
            ImageUpdateForm {
                id: created.id,
                title: Some("two".into()),
                description: Some("second".into()),
            },
            &notifications,
        )
        .await?
        .expect("image was just created");
    harness.service.delete(updated.id, &notifications).await?;
    let after_delete = harness.service.get(updated.id, &notifications).await?;

    assert_eq!(updated.path, "/img/gallery/two.png");
    assert_eq!(after_delete, None);
    assert!(harness.repository.is_empty().await);

    let kinds: Vec<_> = notifications
        .snapshot()
        .await?
        .into_iter()
        .map(|m| m.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::Info,
            NotificationKind::Info,
            NotificationKind::Info,
            NotificationKind::Error,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn second_delete_of_same_image_fails() -> Result<()> {
    let harness = Harness::new();
    let notifications = harness.session(SessionId::new());
    let created = harness
        .service
        .create(&UploadedFile::new("x.png"), ImageCreateForm::default(), &notifications)
        .await?;

    harness.service.delete(created.id, &notifications).await?;
    let second = harness.service.delete(created.id, &notifications).await;

    assert!(matches!(
        second,
        Err(ImageServiceError::DatabaseOperation { .. })
    ));
    let snapshot = notifications.snapshot().await?;
    let last = snapshot.last().expect("delete failure was reported");
    assert!(last.is_error());
    assert!(last.text.starts_with(&format!(
        "Image with uuid [{}] can not be deleted: ",
        created.id
    )));
    Ok(())
}

#[tokio::test]
async fn empty_filename_is_rejected_by_the_store() -> Result<()> {
    let harness = Harness::new();
    let notifications = harness.session(SessionId::new());

    let result = harness
        .service
        .clone()
        .with_storage_prefix("")
        .create(&UploadedFile::new(""), ImageCreateForm::default(), &notifications)
        .await;

    assert!(matches!(
        result,
        Err(ImageServiceError::DatabaseOperation { .. })
    ));
    assert!(harness.repository.is_empty().await);
    let snapshot = notifications.snapshot().await?;
    assert_eq!(snapshot.len(), 1);
    assert!(
        snapshot[0]
            .text
            .starts_with("Database operation failed with message: ")
    );
    Ok(())
}
