//! # Gallery Core
//!
//! Core library for the gallery service: image metadata records, the image
//! lifecycle service, and the session-scoped notification pipeline that
//! reports the outcome of every operation back to the client.
//!
//! ## Overview
//!
//! - **Images**: metadata records (title, description, storage path,
//!   timestamps) persisted through the [`database::ports::images`] port
//! - **Notifications**: an append-only, per-session sequence of info/error
//!   messages stored through the [`database::ports::sessions`] port
//! - **Validation**: form checks whose violations flow into the same
//!   notification channel
//!
//! ## Feature Flags
//!
//! - `database`: Enables the PostgreSQL image store (SQLx) and the Redis
//!   session store. In-memory adapters are always available.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gallery_core::{
//!     database::infrastructure::memory::{
//!         InMemoryImageRepository, InMemorySessionStore,
//!     },
//!     domain::{
//!         image::{ImageCreateForm, UploadedFile},
//!         image_service::ImageService,
//!         notification::{NotificationService, SessionId},
//!     },
//! };
//!
//! async fn upload() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = ImageService::new(Arc::new(InMemoryImageRepository::new()));
//!     let notifications = NotificationService::new(
//!         Arc::new(InMemorySessionStore::new()),
//!         SessionId::new(),
//!     );
//!
//!     let form = ImageCreateForm {
//!         title: Some("Harbour".into()),
//!         description: None,
//!     };
//!     let file = UploadedFile::new("harbour.jpg");
//!     let image = service.create(&file, form, &notifications).await?;
//!
//!     println!("stored at {}", image.path);
//!     for message in notifications.snapshot().await? {
//!         println!("{:?}: {}", message.kind, message.text);
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Route constants and the response envelope shared by the server and its
/// clients
pub mod api;

/// Storage ports and their adapters
pub mod database;

/// Image records, notifications, validation and the lifecycle service
pub mod domain;

/// Error types and error handling utilities
pub mod error;

/// Embedded schema migrations for the PostgreSQL image store
#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use api::envelope::ResponseEnvelope;
pub use domain::image::{Image, ImageCreateForm, ImageUpdateForm, UploadedFile};
pub use domain::image_service::{ImageService, ImageServiceError};
pub use domain::notification::{
    NotificationKind, NotificationMessage, NotificationService, SessionId,
};
pub use error::{GalleryError, Result};
