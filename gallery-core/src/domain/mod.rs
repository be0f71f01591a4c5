/// Image records, upload handles and forms
pub mod image;
/// Image lifecycle operations
pub mod image_service;
pub mod notification;
pub mod validation;
