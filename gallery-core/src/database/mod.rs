/// Adapters implementing the storage ports
pub mod infrastructure;
/// Storage interfaces the domain depends on
pub mod ports;
