//! Behaviour of the PostgreSQL image store. Needs a reachable database:
//! `DATABASE_URL=postgres://... cargo test -p gallery-core -- --ignored`.

#![cfg(feature = "database")]

use anyhow::Result;
use gallery_core::{
    GalleryError,
    database::infrastructure::postgres::PostgresImageRepository,
    database::ports::images::ImageRepository,
    domain::image::NewImage,
};
use sqlx::PgPool;
use uuid::Uuid;

fn new_image(title: &str, path: &str) -> NewImage {
    NewImage::new(Some(title.to_string()), None, path.to_string())
}

#[sqlx::test(migrator = "gallery_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn insert_then_find_round_trips_fields(pool: PgPool) -> Result<()> {
    let repo = PostgresImageRepository::new(pool);

    let created = repo.insert(new_image("dock", "/img/gallery/dock.png")).await?;
    let fetched = repo.find_by_id(created.id).await?.expect("row exists");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title.as_deref(), Some("dock"));
    assert_eq!(fetched.description, None);
    assert_eq!(fetched.path, "/img/gallery/dock.png");
    Ok(())
}

#[sqlx::test(migrator = "gallery_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn find_all_orders_by_creation(pool: PgPool) -> Result<()> {
    let repo = PostgresImageRepository::new(pool);

    let first = repo.insert(new_image("one", "/1")).await?;
    let second = repo.insert(new_image("two", "/2")).await?;

    let ids: Vec<Uuid> = repo.find_all().await?.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    Ok(())
}

#[sqlx::test(migrator = "gallery_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn column_limits_are_rejected_as_arguments(pool: PgPool) -> Result<()> {
    let repo = PostgresImageRepository::new(pool);

    let too_long = NewImage::new(Some("x".repeat(51)), None, "/a".into());
    let err = repo.insert(too_long).await.unwrap_err();
    assert!(matches!(err, GalleryError::ArgumentRejected(_)));

    let empty_path = new_image("t", "");
    let err = repo.insert(empty_path).await.unwrap_err();
    assert!(matches!(err, GalleryError::ArgumentRejected(_)));

    assert!(repo.find_all().await?.is_empty());
    Ok(())
}

#[sqlx::test(migrator = "gallery_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn update_and_delete(pool: PgPool) -> Result<()> {
    let repo = PostgresImageRepository::new(pool);

    let mut image = repo.insert(new_image("before", "/before")).await?;
    image.title = Some("after".into());
    image.path = "/after".into();
    let updated = repo.update(&image).await?;
    assert_eq!(updated.title.as_deref(), Some("after"));
    assert_eq!(updated.path, "/after");

    repo.delete_by_id(image.id).await?;
    assert_eq!(repo.find_by_id(image.id).await?, None);

    let err = repo.delete_by_id(image.id).await.unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(_)));
    Ok(())
}
