//! Caching subsystem.
//!
//! - [`response::ResponseCache`]: TTL cache of parsed upstream payloads,
//!   keyed by resolved URL. Owned by each
//!   [`JikanGateway`](crate::gateway::JikanGateway) instance and shared by
//!   every request that instance serves.

pub mod response;

pub use response::{CacheConfig, CacheEntry, ResponseCache};
