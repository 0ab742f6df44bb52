//! Cache module for the Redis-backed verification store
//!
//! Provides a Redis client with connection retry and the
//! [`RedisVerificationRepository`] built on top of it.

pub mod redis_client;
pub mod verification_store;


pub use redis_client::RedisClient;
pub use verification_store::RedisVerificationRepository;

// Re-export commonly used types
pub use vm_shared::config::cache::CacheConfig;
