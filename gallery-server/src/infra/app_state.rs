use std::{fmt, sync::Arc};

use gallery_core::{
    ImageService, NotificationService, SessionId,
    database::ports::{images::ImageRepository, sessions::SessionStore},
};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub image_service: Arc<ImageService<dyn ImageRepository>>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        images: Arc<dyn ImageRepository>,
        sessions: Arc<dyn SessionStore>,
        config: Config,
    ) -> Self {
        let image_service =
            ImageService::new(images).with_storage_prefix(config.storage_prefix.clone());

        Self {
            image_service: Arc::new(image_service),
            sessions,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Notification channel bound to `session_id`.
    pub fn notifications(&self, session_id: SessionId) -> NotificationService {
        NotificationService::new(self.sessions.clone(), session_id)
    }
}
