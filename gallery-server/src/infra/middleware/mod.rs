//! Request pipeline for the gallery API: session resolution, the multipart
//! guard for mutating endpoints, and the response envelope.

pub mod envelope;
pub mod multipart;
pub mod session;

pub use envelope::envelope_middleware;
pub use multipart::require_multipart;
pub use session::{
    SESSION_COOKIE, create_session_cookie, extract_session_from_cookies,
    session_middleware,
};
