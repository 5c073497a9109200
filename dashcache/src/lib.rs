mod dashcache;
mod key;

pub use dashcache::{DashCache, Lookup};
pub use key::CacheKey;
