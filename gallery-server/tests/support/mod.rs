#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use gallery_core::{
    ResponseEnvelope,
    database::{
        infrastructure::memory::{InMemoryImageRepository, InMemorySessionStore},
        ports::{images::ImageRepository, sessions::SessionStore},
    },
};
use gallery_server::{AppState, create_app, infra::config::Config};

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub images: Arc<dyn ImageRepository>,
    pub sessions: Arc<InMemorySessionStore>,
}

pub struct TestAppBuilder {
    images: Arc<dyn ImageRepository>,
    config: Config,
    save_cookies: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            images: Arc::new(InMemoryImageRepository::new()),
            config: Config {
                server_host: "127.0.0.1".into(),
                server_port: 0,
                dev_mode: true,
                ..Config::default()
            },
            save_cookies: true,
        }
    }

    pub fn with_images(mut self, images: Arc<dyn ImageRepository>) -> Self {
        self.images = images;
        self
    }

    pub fn with_session_ttl(mut self, secs: u64) -> Self {
        self.config.session_ttl_secs = secs;
        self
    }

    /// Send no session cookie back, so every request starts a new session.
    pub fn without_cookies(mut self) -> Self {
        self.save_cookies = false;
        self
    }

    pub fn build(self) -> Result<TestApp> {
        let sessions = Arc::new(InMemorySessionStore::with_ttl(self.config.session_ttl()));
        let state = AppState::new(
            self.images.clone(),
            sessions.clone() as Arc<dyn SessionStore>,
            self.config,
        );

        let mut builder = TestServer::builder();
        if self.save_cookies {
            builder = builder.save_cookies();
        }
        let server = builder
            .build(create_app(state.clone()))
            .map_err(|err| anyhow::anyhow!(err.to_string()))?;

        Ok(TestApp {
            server,
            state,
            images: self.images,
            sessions,
        })
    }
}

pub fn build_test_app() -> Result<TestApp> {
    TestAppBuilder::new().build()
}

pub fn upload_form(title: &str, description: &str, filename: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("description", description.to_string())
        .add_part(
            "file",
            Part::bytes(b"\x89PNG fake image bytes".to_vec())
                .file_name(filename.to_string())
                .mime_type("image/png"),
        )
}

pub fn envelope(response: &axum_test::TestResponse) -> ResponseEnvelope {
    response.json::<ResponseEnvelope>()
}

pub fn texts(envelope: &ResponseEnvelope) -> Vec<&str> {
    envelope.messages.iter().map(|m| m.text.as_str()).collect()
}
