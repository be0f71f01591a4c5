//! In-process adapters. Used when no external database or session backend is
//! configured, and as the default fixtures in tests.

mod images;
mod sessions;

pub use images::InMemoryImageRepository;
pub use sessions::{DEFAULT_SESSION_TTL, InMemorySessionStore};
