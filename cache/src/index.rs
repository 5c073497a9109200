use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use tag::{Id, Tag};

/// Volatile tag -> entry id index.
///
/// Each bucket is guarded by its dashmap shard, so every single-tag insert,
/// lookup and removal is atomic. Operations spanning several tags are not.
/// A missing bucket is the same as an empty one.
#[derive(Debug, Default)]
pub struct TagIndex {
    buckets: DashMap<Tag, HashSet<Id>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(%id, ?tags), skip_all)
    )]
    pub fn register(&self, id: &Id, tags: &[Tag]) {
        for tag in tags {
            self.buckets
                .entry(tag.clone())
                .or_default()
                .insert(id.clone());
        }
    }

    /// Ids registered under any of `tags`, bucket by bucket in the given order.
    ///
    /// Not deduplicated: an id registered under two of the queried tags shows
    /// up twice.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?tags), skip_all, ret)
    )]
    pub fn resolve(&self, tags: &[Tag]) -> Vec<Id> {
        let mut ids = Vec::new();
        for tag in tags {
            if let Some(bucket) = self.buckets.get(tag) {
                ids.extend(bucket.iter().cloned());
            }
        }
        ids
    }

    /// Drops whole buckets. Ids shared with other tags stay reachable through them.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?tags), skip_all)
    )]
    pub fn clear(&self, tags: &[Tag]) {
        for tag in tags {
            self.buckets.remove(tag);
        }
    }

    pub fn reset(&self) {
        self.buckets.clear();
    }

    pub fn contains(&self, tag: &str, id: &str) -> bool {
        self.buckets
            .get(tag)
            .is_some_and(|bucket| bucket.contains(id))
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.buckets.iter().map(|bucket| bucket.key().clone()).collect()
    }

    /// Number of non-cleared tags.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Point-in-time copy of every bucket, for assertions.
    pub fn snapshot(&self) -> HashMap<Tag, HashSet<Id>> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.key().clone(), bucket.value().clone()))
            .collect()
    }
}
