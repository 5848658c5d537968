//! Redis-backed temporary store.

pub mod redis_client;
pub mod temp_store;

pub use redis_client::RedisClient;
pub use temp_store::RedisTemporaryStore;
