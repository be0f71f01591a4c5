macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared across gallery services
pub mod v1 {
    /// Prefix shared by every versioned route.
    pub const ROOT: &str = "/api/v1";

    /// Image metadata endpoints
    pub mod images {
        /// `GET` every stored image.
        pub const LIST: &str = v1_path!("/image/all");
        /// `POST` to create, `PUT` to update (multipart).
        pub const COLLECTION: &str = v1_path!("/image");
        /// `GET` or `DELETE` one image by `{uuid}`.
        pub const ITEM: &str = v1_path!("/image/{uuid}");
    }
}

/// Helpers for filling in route templates
pub mod utils {
    /// Replace the `{uuid}` placeholder in a route template.
    pub fn replace_uuid(template: &str, uuid: impl std::fmt::Display) -> String {
        template.replace("{uuid}", &uuid.to_string())
    }
}
