use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::CacheKey;

/// Concurrent in-memory store with per-entry expiry.
///
/// Expired entries are not evicted on read. They are handed back as
/// [`Lookup::Stale`] until removed or purged, so callers can still serve them
/// when the origin is failing. Nothing purges on its own; the owner calls
/// [`DashCache::purge_expired`].
pub struct DashCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
}

struct Entry<V> {
    value: V,
    // `None` when `now + ttl` overflows `Instant`.
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    Fresh(V),
    Stale(V),
}

impl<V> Lookup<V> {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Lookup::Fresh(_))
    }

    pub fn fresh(self) -> Option<V> {
        match self {
            Lookup::Fresh(value) => Some(value),
            Lookup::Stale(_) => None,
        }
    }

    pub fn into_inner(self) -> V {
        match self {
            Lookup::Fresh(value) | Lookup::Stale(value) => value,
        }
    }
}

impl<K, V> DashCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Default time to live used by [`DashCache::put`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key), skip_all)
    )]
    pub fn get(&self, key: &K) -> Option<Lookup<V>> {
        let Some(entry) = self.entries.get(key) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("miss");

            return None;
        };

        if entry.is_expired(Instant::now()) {
            #[cfg(feature = "tracing")]
            tracing::debug!("stale");

            Some(Lookup::Stale(entry.value.clone()))
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("hit");

            Some(Lookup::Fresh(entry.value.clone()))
        }
    }

    pub fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, self.ttl);
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key, ?ttl), skip_all)
    )]
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries.insert(key, Entry { value, expires_at });
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key), skip_all, ret)
    )]
    pub fn remove(&self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every key, returning how many were actually present.
    pub fn remove_all<'k>(&self, keys: impl IntoIterator<Item = &'k K>) -> usize
    where
        K: 'k,
    {
        keys.into_iter().filter(|key| self.remove(key)).count()
    }

    /// Drops expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                purged += 1;
            }
            keep
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(purged, "purged expired entries");

        purged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
