use std::hash::Hash;

/// Bound on store keys. Keys also have to be `Debug` when spans record them.
#[cfg(feature = "tracing")]
pub trait CacheKey: Hash + Eq + std::fmt::Debug {}

#[cfg(feature = "tracing")]
impl<K> CacheKey for K where K: Hash + Eq + std::fmt::Debug {}

#[cfg(not(feature = "tracing"))]
pub trait CacheKey: Hash + Eq {}

#[cfg(not(feature = "tracing"))]
impl<K> CacheKey for K where K: Hash + Eq {}
