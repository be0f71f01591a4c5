//! Repository ports (interfaces) the domain services depend on.
//! Implementations live under `database::infrastructure`.

/// Image metadata store
pub mod images;
/// Per-session attribute store
pub mod sessions;
