pub mod envelope;
/// Versioned route constants
pub mod routes;
