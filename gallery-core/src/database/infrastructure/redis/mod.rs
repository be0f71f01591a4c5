mod sessions;

pub use sessions::RedisSessionStore;
